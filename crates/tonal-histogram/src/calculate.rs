//! Histogram accumulation
//!
//! [`Histogram::calculate`] picks an accumulation format and bin count
//! from the source format, prepares the table, then streams the source
//! (and mask, if any) chunk by chunk.
//!
//! | layout | slot assignments |
//! |---|---|
//! | Y    | v += w |
//! | YA   | v += a·w; a += w |
//! | RGB  | r, g, b += w; v += w at max(r, g, b) |
//! | RGBA | r, g, b += a·w; a += w; v += a·w at max(r, g, b) |
//!
//! `w` is the mask sample, or 1.0 without a mask.

use crate::error::{HistogramError, HistogramResult};
use crate::histogram::Histogram;
use crate::notify::HistogramEvent;
use tonal_core::{
    ChunkIter, ColorModel, ComponentType, FloatFormat, FloatLayout, PixelFormat, PixelRegion,
    Rect, Trc,
};
use tracing::{debug, trace};

/// Bin count for 8-bit unsigned sources
pub const N_BINS_U8: usize = 256;

/// Bin count for every other source
pub const N_BINS_HIGH_PRECISION: usize = 1024;

/// Subtracted from the bin count before scaling so that 1.0 lands in
/// the last bin.
pub const BIN_EPSILON: f64 = 0.0001;

/// Bin count used for a source component type.
pub fn bin_count(component: ComponentType) -> usize {
    match component {
        ComponentType::U8 => N_BINS_U8,
        _ => N_BINS_HIGH_PRECISION,
    }
}

/// Bin index of a float sample.
///
/// The sample is clamped to [0,1]; NaN falls into bin 0.
#[inline]
pub fn bin_index(value: f32, n_bins: usize) -> usize {
    let scaled = f64::from(value).clamp(0.0, 1.0) * (n_bins as f64 - BIN_EPSILON);
    scaled as usize
}

/// Float format a source is accumulated in.
///
/// # Errors
///
/// Returns [`HistogramError::UnsupportedModel`] for CMYK and Lab sources.
pub fn accumulation_format(
    format: &PixelFormat,
    gamma_correct: bool,
) -> HistogramResult<FloatFormat> {
    use ColorModel as M;
    use FloatLayout as L;

    let (layout, trc) = match (format.model, format.trc, gamma_correct) {
        (M::Indexed, _, _) => (L::Rgb, Trc::Perceptual),
        (M::IndexedAlpha, _, _) => (L::Rgba, Trc::Perceptual),

        (M::Gray, Trc::Linear, false) => (L::Y, Trc::Linear),
        (M::Gray, Trc::Linear, true) => (L::Y, Trc::Perceptual),
        (M::Gray, Trc::Perceptual, _) => (L::Y, Trc::Perceptual),

        (M::GrayAlpha, Trc::Linear, false) => (L::YA, Trc::Linear),
        (M::GrayAlpha, Trc::Linear, true) => (L::YA, Trc::Perceptual),
        (M::GrayAlpha, Trc::Perceptual, _) => (L::YA, Trc::Perceptual),

        (M::Rgb, Trc::Linear, false) => (L::Rgb, Trc::Linear),
        (M::Rgb, Trc::Linear, true) => (L::Rgb, Trc::Perceptual),
        (M::Rgb, Trc::Perceptual, _) => (L::Rgb, Trc::Perceptual),

        (M::Rgba, Trc::Linear, false) => (L::Rgba, Trc::Linear),
        (M::Rgba, Trc::Linear, true) => (L::Rgba, Trc::Perceptual),
        (M::Rgba, Trc::Perceptual, _) => (L::Rgba, Trc::Perceptual),

        (M::Cmyk | M::Lab, _, _) => return Err(HistogramError::UnsupportedModel(*format)),
    };

    Ok(FloatFormat::new(layout, trc))
}

impl Histogram {
    /// Fill the histogram from `rect` of `source`, optionally weighted by
    /// `rect`-sized mask samples.
    ///
    /// The previous table is replaced entirely. Observers hear each kind
    /// of change at most once, after the pass completes.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the previous table untouched, if `rect`
    /// is empty or outside the source, if the source model cannot be
    /// accumulated, or if the mask is not a single gray channel of the
    /// same size. If a region delivers fewer pixels than promised the
    /// table is cleared and [`HistogramError::ShortRead`] returned.
    ///
    /// # Example
    ///
    /// ```
    /// use tonal_core::{ColorModel, ComponentType, PixelBuffer, PixelFormat, PixelRegion, Trc};
    /// use tonal_histogram::{Histogram, HistogramChannel};
    ///
    /// let format = PixelFormat::new(ColorModel::Gray, Trc::Perceptual, ComponentType::U8);
    /// let buffer = PixelBuffer::from_u8(2, 2, format, vec![0, 0, 255, 255]).unwrap();
    ///
    /// let mut histogram = Histogram::new(false);
    /// histogram.calculate(&buffer, &buffer.extent(), None).unwrap();
    /// assert_eq!(histogram.n_bins(), 256);
    /// assert_eq!(histogram.get_value(HistogramChannel::Value, 255), 2.0);
    /// ```
    pub fn calculate(
        &mut self,
        source: &dyn PixelRegion,
        rect: &Rect,
        mask: Option<(&dyn PixelRegion, &Rect)>,
    ) -> HistogramResult<()> {
        if rect.is_empty() {
            return Err(HistogramError::EmptyRegion {
                w: rect.w,
                h: rect.h,
            });
        }

        let source_format = source.format();
        let format = accumulation_format(&source_format, self.gamma_correct())?;
        let n_bins = bin_count(source_format.component);
        let n_components = format.n_components();

        let mask_chunks = match mask {
            Some((region, mask_rect)) => Some(open_mask(region, mask_rect, rect)?),
            None => None,
        };
        let chunks = source.read_chunks(rect, format)?;

        debug!(
            source = %source_format,
            accumulation = %format,
            n_bins,
            masked = mask_chunks.is_some(),
            "calculating histogram"
        );

        self.notifier_mut().freeze();
        self.reset_table(n_components + 1, n_bins);

        let mut accumulator = Accumulator {
            values: self.table_mut(),
            n_bins,
            layout: format.layout,
        };
        let result = accumulator.scan(chunks, mask_chunks.map(MaskCursor::new), rect.pixel_count());

        if result.is_err() {
            self.clear();
        }
        self.notifier_mut().notify(HistogramEvent::Values);
        self.notifier_mut().thaw();

        result
    }
}

/// Validate a mask against the source rectangle and open its scan.
fn open_mask<'a>(
    region: &'a dyn PixelRegion,
    mask_rect: &Rect,
    rect: &Rect,
) -> HistogramResult<ChunkIter<'a>> {
    let mask_format = region.format();
    if mask_format.model != ColorModel::Gray {
        return Err(HistogramError::InvalidMask(mask_format));
    }
    if !mask_rect.same_size(rect) {
        return Err(HistogramError::MaskMismatch {
            src_w: rect.w,
            src_h: rect.h,
            mask_w: mask_rect.w,
            mask_h: mask_rect.h,
        });
    }
    Ok(region.read_chunks(mask_rect, FloatFormat::mask())?)
}

/// Pulls mask weights one pixel at a time, independent of chunking.
struct MaskCursor<'a> {
    chunks: ChunkIter<'a>,
    current: Vec<f32>,
    pos: usize,
}

impl<'a> MaskCursor<'a> {
    fn new(chunks: ChunkIter<'a>) -> Self {
        Self {
            chunks,
            current: Vec::new(),
            pos: 0,
        }
    }

    fn next_weight(&mut self) -> Option<f64> {
        while self.pos >= self.current.len() {
            self.current = self.chunks.next()?;
            self.pos = 0;
        }
        let weight = self.current[self.pos];
        self.pos += 1;
        Some(f64::from(weight))
    }
}

struct Accumulator<'a> {
    values: &'a mut [f64],
    n_bins: usize,
    layout: FloatLayout,
}

impl Accumulator<'_> {
    fn scan(
        &mut self,
        chunks: ChunkIter<'_>,
        mut mask: Option<MaskCursor<'_>>,
        expected: usize,
    ) -> HistogramResult<()> {
        let n_components = self.layout.n_components();
        let mut pixels = 0usize;

        for chunk in chunks {
            if chunk.len() % n_components != 0 {
                return Err(HistogramError::MalformedChunk {
                    len: chunk.len(),
                    components: n_components,
                });
            }
            trace!(pixels = chunk.len() / n_components, "accumulating chunk");

            for pixel in chunk.chunks_exact(n_components) {
                if pixels == expected {
                    break;
                }
                let weight = match mask.as_mut() {
                    Some(cursor) => match cursor.next_weight() {
                        Some(weight) => weight,
                        None => {
                            return Err(HistogramError::ShortRead {
                                expected,
                                actual: pixels,
                            });
                        }
                    },
                    None => 1.0,
                };
                self.add_pixel(pixel, weight);
                pixels += 1;
            }
        }

        if pixels < expected {
            return Err(HistogramError::ShortRead {
                expected,
                actual: pixels,
            });
        }
        Ok(())
    }

    #[inline]
    fn add(&mut self, slot: usize, value: f32, weight: f64) {
        let bin = bin_index(value, self.n_bins);
        self.values[slot * self.n_bins + bin] += weight;
    }

    #[inline]
    fn add_pixel(&mut self, pixel: &[f32], weight: f64) {
        match self.layout {
            FloatLayout::Y => {
                self.add(0, pixel[0], weight);
            }
            FloatLayout::YA => {
                let alpha = f64::from(pixel[1]);
                self.add(0, pixel[0], alpha * weight);
                self.add(1, pixel[1], weight);
            }
            FloatLayout::Rgb => {
                self.add(1, pixel[0], weight);
                self.add(2, pixel[1], weight);
                self.add(3, pixel[2], weight);
                self.add(0, max3(pixel[0], pixel[1], pixel[2]), weight);
            }
            FloatLayout::Rgba => {
                let alpha = f64::from(pixel[3]);
                self.add(1, pixel[0], alpha * weight);
                self.add(2, pixel[1], alpha * weight);
                self.add(3, pixel[2], alpha * weight);
                self.add(4, pixel[3], weight);
                self.add(0, max3(pixel[0], pixel[1], pixel[2]), alpha * weight);
            }
        }
    }
}

#[inline]
fn max3(a: f32, b: f32, c: f32) -> f32 {
    let max = if a > b { a } else { b };
    if c > max { c } else { max }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_index_endpoints() {
        assert_eq!(bin_index(0.0, 256), 0);
        assert_eq!(bin_index(1.0, 256), 255);
        assert_eq!(bin_index(1.0, 1024), 1023);
        assert_eq!(bin_index(0.5, 256), 127);
        assert_eq!(bin_index(128.0 / 255.0, 256), 128);
    }

    #[test]
    fn test_bin_index_clamps() {
        assert_eq!(bin_index(-3.0, 256), 0);
        assert_eq!(bin_index(7.5, 1024), 1023);
        assert_eq!(bin_index(f32::NAN, 256), 0);
    }

    #[test]
    fn test_bin_index_u8_identity() {
        for v in 0..=255u32 {
            assert_eq!(bin_index(v as f32 / 255.0, 256), v as usize);
        }
    }

    #[test]
    fn test_bin_count() {
        assert_eq!(bin_count(ComponentType::U8), 256);
        assert_eq!(bin_count(ComponentType::U16), 1024);
        assert_eq!(bin_count(ComponentType::Half), 1024);
        assert_eq!(bin_count(ComponentType::Float), 1024);
    }

    #[test]
    fn test_accumulation_format_gamma() {
        let linear = PixelFormat::new(ColorModel::Rgb, Trc::Linear, ComponentType::U16);
        assert_eq!(
            accumulation_format(&linear, false).unwrap(),
            FloatFormat::new(FloatLayout::Rgb, Trc::Linear)
        );
        assert_eq!(
            accumulation_format(&linear, true).unwrap(),
            FloatFormat::new(FloatLayout::Rgb, Trc::Perceptual)
        );

        let perceptual = PixelFormat::new(ColorModel::GrayAlpha, Trc::Perceptual, ComponentType::U8);
        assert_eq!(
            accumulation_format(&perceptual, false).unwrap(),
            FloatFormat::new(FloatLayout::YA, Trc::Perceptual)
        );
    }

    #[test]
    fn test_accumulation_format_palette() {
        assert_eq!(
            accumulation_format(&PixelFormat::indexed(false), false).unwrap(),
            FloatFormat::new(FloatLayout::Rgb, Trc::Perceptual)
        );
        assert_eq!(
            accumulation_format(&PixelFormat::indexed(true), false).unwrap(),
            FloatFormat::new(FloatLayout::Rgba, Trc::Perceptual)
        );
    }

    #[test]
    fn test_accumulation_format_unsupported() {
        let cmyk = PixelFormat::new(ColorModel::Cmyk, Trc::Linear, ComponentType::U8);
        assert!(matches!(
            accumulation_format(&cmyk, true),
            Err(HistogramError::UnsupportedModel(_))
        ));
        let lab = PixelFormat::new(ColorModel::Lab, Trc::Linear, ComponentType::Float);
        assert!(accumulation_format(&lab, false).is_err());
    }

    #[test]
    fn test_max3() {
        assert_eq!(max3(0.1, 0.5, 0.3), 0.5);
        assert_eq!(max3(0.9, 0.5, 0.3), 0.9);
        assert_eq!(max3(0.1, 0.5, 0.7), 0.7);
    }
}
