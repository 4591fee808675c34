//! Tonal Core - Pixel data structures for the histogram engine
//!
//! This crate provides the types the histogram engine consumes:
//!
//! - [`PixelFormat`] / [`FloatFormat`] - Storage and scan encodings
//! - [`Rect`] - Rectangle regions
//! - [`Palette`] - Color table for indexed buffers
//! - [`PixelRegion`] - Chunked scanning interface
//! - [`PixelBuffer`] - In-memory region implementation
//! - [`transfer`] - sRGB tone response curves

pub mod buffer;
pub mod error;
pub mod format;
pub mod palette;
pub mod rect;
pub mod region;
pub mod transfer;

pub use buffer::{DEFAULT_CHUNK_LEN, PixelBuffer, SampleData};
pub use error::{Error, Result};
pub use format::{ColorModel, ComponentType, FloatFormat, FloatLayout, PixelFormat, Trc};
pub use half::f16;
pub use palette::{MAX_PALETTE_ENTRIES, Palette, RgbaQuad};
pub use rect::Rect;
pub use region::{ChunkIter, PixelRegion, check_rect};
