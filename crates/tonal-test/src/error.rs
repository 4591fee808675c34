//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to build a fixture buffer
    #[error("failed to build fixture '{name}': {source}")]
    Fixture {
        name: &'static str,
        #[source]
        source: tonal_core::Error,
    },

    /// Value comparison failed
    #[error(
        "value comparison failed at index {index}: expected {expected}, got {actual}, delta {delta}"
    )]
    ValueMismatch {
        index: usize,
        expected: f64,
        actual: f64,
        delta: f64,
    },

    /// Slice comparison failed
    #[error("slice comparison failed at index {index}: lengths {expected} vs {actual}")]
    LengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
