//! Pixel regions
//!
//! [`PixelRegion`] is the seam between the histogram engine and whatever
//! owns the pixels. A region reports its storage format and extent and,
//! given a rectangle, streams the pixels inside it as chunks of
//! interleaved `f32` samples in a requested [`FloatFormat`].
//!
//! Chunks are delivered in row-major pixel order. Each chunk holds a
//! whole number of pixels; how many is up to the implementation. A scan
//! is a single pass and is never restarted, callers ask for a fresh one.

use crate::error::{Error, Result};
use crate::format::{FloatFormat, PixelFormat};
use crate::rect::Rect;

/// Lazy sequence of float chunks produced by a scan
pub type ChunkIter<'a> = Box<dyn Iterator<Item = Vec<f32>> + 'a>;

/// Source of pixel data that can be scanned in chunks
pub trait PixelRegion {
    /// Storage format of the pixels.
    fn format(&self) -> PixelFormat;

    /// Rectangle covering every addressable pixel.
    fn extent(&self) -> Rect;

    /// Stream the pixels of `rect` converted to `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if `rect` is empty or outside [`extent`](Self::extent),
    /// or if the storage format cannot be converted to `target`.
    fn read_chunks(&self, rect: &Rect, target: FloatFormat) -> Result<ChunkIter<'_>>;
}

/// Check that `rect` is non-empty and lies inside `extent`.
///
/// Shared by region implementations before starting a scan.
pub fn check_rect(rect: &Rect, extent: &Rect) -> Result<()> {
    if rect.is_empty() || !extent.contains_rect(rect) {
        return Err(Error::RegionOutOfBounds {
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
            width: extent.w.max(0) as u32,
            height: extent.h.max(0) as u32,
        });
    }
    Ok(())
}
