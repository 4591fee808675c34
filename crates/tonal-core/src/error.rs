//! Error types for tonal-core
//!
//! Provides a unified error type for buffer construction, region access
//! and pixel format conversion. Each variant captures enough context for
//! diagnostics without exposing internal storage details.

use crate::format::{ComponentType, FloatFormat, PixelFormat};
use thiserror::Error;

/// Tonal core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid buffer dimensions
    #[error("invalid buffer dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Sample storage does not hold the expected number of samples
    #[error("sample data length mismatch: expected {expected}, got {actual}")]
    DataLengthMismatch { expected: usize, actual: usize },

    /// Sample storage type differs from the format's component type
    #[error("sample storage is {actual} but format expects {expected}")]
    ComponentMismatch {
        expected: ComponentType,
        actual: ComponentType,
    },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Requested rectangle is not inside the region extent
    #[error("region {x},{y} {w}x{h} is outside extent {width}x{height}")]
    RegionOutOfBounds {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        width: u32,
        height: u32,
    },

    /// Palette required but not present
    #[error("palette required for {0}")]
    PaletteRequired(PixelFormat),

    /// Palette has no room for another entry
    #[error("palette is full ({0} entries)")]
    PaletteFull(usize),

    /// No conversion path between the two formats
    #[error("unsupported conversion from {from} to {to}")]
    UnsupportedConversion { from: PixelFormat, to: FloatFormat },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for Tonal core operations
pub type Result<T> = std::result::Result<T, Error>;
