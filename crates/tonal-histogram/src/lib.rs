//! Tonal Histogram - Per-channel histograms of pixel regions
//!
//! A [`Histogram`] accumulates a rectangle of a [`PixelRegion`] into a
//! table of per-channel bins, optionally weighted by a mask and by the
//! source's own alpha, and answers statistics over bin ranges.
//!
//! # Examples
//!
//! ```
//! use tonal_core::{ColorModel, ComponentType, PixelBuffer, PixelFormat, Rect, Trc};
//! use tonal_histogram::{Histogram, HistogramChannel};
//!
//! let format = PixelFormat::new(ColorModel::Gray, Trc::Perceptual, ComponentType::U8);
//! let buffer = PixelBuffer::from_u8(4, 1, format, vec![0, 0, 255, 255]).unwrap();
//!
//! let mut histogram = Histogram::new(false);
//! histogram
//!     .calculate(&buffer, &Rect::from_size(4, 1), None)
//!     .unwrap();
//!
//! assert_eq!(histogram.get_count(HistogramChannel::Value, 0, 255), 4.0);
//! assert_eq!(histogram.get_mean(HistogramChannel::Value, 0, 255), 0.5);
//! ```
//!
//! [`PixelRegion`]: tonal_core::PixelRegion

mod calculate;
mod channel;
mod error;
mod histogram;
mod notify;
mod stats;

pub use calculate::{
    BIN_EPSILON, N_BINS_HIGH_PRECISION, N_BINS_U8, accumulation_format, bin_count, bin_index,
};
pub use channel::HistogramChannel;
pub use error::{HistogramError, HistogramResult};
pub use histogram::{DEFAULT_N_BINS, Histogram, MAX_CHANNELS};
pub use notify::{HistogramEvent, HistogramObserver};
pub use stats::{DEFAULT_THRESHOLD, HistogramStats, UNDEFINED_MEDIAN, UNDEFINED_THRESHOLD};
