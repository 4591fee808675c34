//! Error types for tonal-histogram

use thiserror::Error;
use tonal_core::PixelFormat;

/// Errors that can occur while accumulating a histogram
#[derive(Debug, Error)]
pub enum HistogramError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] tonal_core::Error),

    /// Source color model has no accumulation format
    #[error("unsupported color model: {0}")]
    UnsupportedModel(PixelFormat),

    /// Source rectangle covers no pixels
    #[error("empty region: {w}x{h}")]
    EmptyRegion { w: i32, h: i32 },

    /// Mask rectangle does not match the source rectangle
    #[error("mask mismatch: source is {src_w}x{src_h}, mask is {mask_w}x{mask_h}")]
    MaskMismatch {
        src_w: i32,
        src_h: i32,
        mask_w: i32,
        mask_h: i32,
    },

    /// Mask region is not a single gray channel
    #[error("mask must be a single gray channel, got {0}")]
    InvalidMask(PixelFormat),

    /// A region delivered fewer samples than its rectangle promised
    #[error("short read: expected {expected} pixels, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    /// A chunk did not hold a whole number of pixels
    #[error("malformed chunk of {len} samples for {components} components")]
    MalformedChunk { len: usize, components: usize },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for histogram operations
pub type HistogramResult<T> = Result<T, HistogramError>;
