//! Rect - Rectangle regions
//!
//! Describes the part of a pixel region that is scanned.

use crate::error::{Error, Result};

/// A rectangle region
///
/// A small `Copy` type; coordinates are signed so that callers can
/// describe rectangles partly outside an extent and have them rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Rect {
    /// Create a new rectangle
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative, or if the right
    /// or bottom edge does not fit in an `i32`.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "rect dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        if x.checked_add(w).is_none() || y.checked_add(h).is_none() {
            return Err(Error::InvalidParameter(format!(
                "rect edge overflows: x={}, y={}, w={}, h={}",
                x, y, w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a rectangle without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rectangle at the origin covering `width x height`
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            w: i32::try_from(width).unwrap_or(i32::MAX),
            h: i32::try_from(height).unwrap_or(i32::MAX),
        }
    }

    /// Get the right x coordinate (exclusive), saturating at `i32::MAX`
    #[inline]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// Get the bottom y coordinate (exclusive), saturating at `i32::MAX`
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Number of pixels covered, zero for invalid rectangles
    #[inline]
    pub fn pixel_count(&self) -> usize {
        if self.is_valid() {
            self.w as usize * self.h as usize
        } else {
            0
        }
    }

    /// Check if the rectangle is valid (non-negative dimensions)
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.w >= 0 && self.h >= 0
    }

    /// Check if the rectangle is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Check whether two rectangles have the same width and height
    #[inline]
    pub fn same_size(&self, other: &Rect) -> bool {
        self.w == other.w && self.h == other.h
    }

    /// Check if this rectangle contains another
    ///
    /// Edges are compared in `i64`, so rectangles built with
    /// [`Rect::new_unchecked`] never overflow here.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        let edges = |r: &Rect| {
            let (x, y) = (i64::from(r.x), i64::from(r.y));
            (x, y, x + i64::from(r.w), y + i64::from(r.h))
        };
        let (x0, y0, x1, y1) = edges(self);
        let (ox0, oy0, ox1, oy1) = edges(other);
        ox0 >= x0 && oy0 >= y0 && ox1 <= x1 && oy1 <= y1
    }
}
