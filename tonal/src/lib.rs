//! Tonal - Per-channel histograms and tonal statistics for raster images
//!
//! # Overview
//!
//! - Pixel formats, rectangles, palettes and in-memory buffers
//! - Chunked scanning of pixel regions in float encodings
//! - Histogram accumulation with optional mask and alpha weighting
//! - Count, mean, median, standard deviation and Otsu threshold queries
//!
//! # Example
//!
//! ```
//! use tonal::{
//!     ColorModel, ComponentType, Histogram, HistogramChannel, PixelBuffer, PixelFormat, Rect, Trc,
//! };
//!
//! let format = PixelFormat::new(ColorModel::Gray, Trc::Perceptual, ComponentType::U8);
//! let buffer = PixelBuffer::from_u8(2, 1, format, vec![51, 51]).unwrap();
//!
//! let mut histogram = Histogram::new(false);
//! histogram.calculate(&buffer, &Rect::from_size(2, 1), None).unwrap();
//! assert_eq!(histogram.get_median(HistogramChannel::Value, 0, 255), 0.2);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use tonal_core::*;

// Histogram engine as a module, with its main types at the top level
pub use tonal_histogram as histogram;
pub use tonal_histogram::{Histogram, HistogramChannel, HistogramError, HistogramStats};
