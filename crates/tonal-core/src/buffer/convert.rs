//! Sample conversion to float encodings
//!
//! Integer samples are normalized by the maximum of their type, float
//! samples pass through unchanged (they may lie outside [0,1]). Color
//! components are then re-encoded to the target curve; alpha never is.

use super::SampleData;
use crate::error::{Error, Result};
use crate::format::{ColorModel, FloatFormat, FloatLayout, PixelFormat, Trc};
use crate::palette::Palette;
use crate::transfer::convert_trc;

/// Per-scan conversion from a storage format to a float format
#[derive(Debug, Clone, Copy)]
pub(crate) struct Converter<'a> {
    source: PixelFormat,
    target: FloatFormat,
    palette: Option<&'a Palette>,
}

impl<'a> Converter<'a> {
    /// Check that a conversion path exists and build the converter.
    pub(crate) fn new(
        source: PixelFormat,
        palette: Option<&'a Palette>,
        target: FloatFormat,
    ) -> Result<Self> {
        let compatible = matches!(
            (source.model, target.layout),
            (ColorModel::Gray, FloatLayout::Y)
                | (ColorModel::GrayAlpha, FloatLayout::YA)
                | (ColorModel::Rgb, FloatLayout::Rgb)
                | (ColorModel::Rgba, FloatLayout::Rgba)
                | (
                    ColorModel::Indexed | ColorModel::IndexedAlpha,
                    FloatLayout::Rgb | FloatLayout::Rgba
                )
        );
        if !compatible {
            return Err(Error::UnsupportedConversion {
                from: source,
                to: target,
            });
        }
        if source.is_palette() && palette.is_none() {
            return Err(Error::PaletteRequired(source));
        }

        Ok(Self {
            source,
            target,
            palette,
        })
    }

    /// Number of floats written per pixel.
    #[inline]
    pub(crate) fn n_components(&self) -> usize {
        self.target.n_components()
    }

    /// Convert the pixel whose first sample is at `offset`, appending to `out`.
    pub(crate) fn convert_pixel(&self, samples: &SampleData, offset: usize, out: &mut Vec<f32>) {
        match self.palette {
            Some(palette) if self.source.is_palette() => {
                self.convert_indexed(palette, samples, offset, out)
            }
            _ => self.convert_direct(samples, offset, out),
        }
    }

    fn convert_direct(&self, samples: &SampleData, offset: usize, out: &mut Vec<f32>) {
        let n = self.source.n_components();
        let alpha = self.source.has_alpha().then(|| n - 1);

        for c in 0..n {
            let v = samples.normalized(offset + c);
            if Some(c) == alpha {
                out.push(v);
            } else {
                out.push(convert_trc(v, self.source.trc, self.target.trc));
            }
        }
    }

    fn convert_indexed(
        &self,
        palette: &Palette,
        samples: &SampleData,
        offset: usize,
        out: &mut Vec<f32>,
    ) {
        let color = palette
            .get(samples.palette_index(offset))
            .copied()
            .unwrap_or_default();

        for v in [color.red, color.green, color.blue] {
            out.push(convert_trc(
                v as f32 / 255.0,
                Trc::Perceptual,
                self.target.trc,
            ));
        }
        if self.target.has_alpha() {
            out.push(color.alpha as f32 / 255.0);
        }
    }
}
