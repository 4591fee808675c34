//! PixelBuffer - In-memory pixel region
//!
//! `PixelBuffer` is the reference [`PixelRegion`] implementation: a
//! rectangular grid of interleaved samples in any [`PixelFormat`] this
//! crate knows about, with an optional [`Palette`] for indexed formats.
//!
//! # Ownership model
//!
//! `PixelBuffer` uses `Arc` for its sample storage, so cloning is cheap
//! and clones share pixels. Buffers are immutable once built.
//!
//! # Chunking
//!
//! A scan yields one chunk per row span of at most
//! [`chunk_len`](PixelBuffer::chunk_len) pixels. The chunk length only
//! changes how the pixels are grouped, never which pixels are produced.

mod convert;

use crate::error::{Error, Result};
use crate::format::{ComponentType, FloatFormat, PixelFormat};
use crate::palette::Palette;
use crate::rect::Rect;
use crate::region::{ChunkIter, PixelRegion, check_rect};
use convert::Converter;
use half::f16;
use std::sync::Arc;

/// Default number of pixels per scanned chunk
pub const DEFAULT_CHUNK_LEN: usize = 128;

/// Interleaved sample storage
#[derive(Debug, Clone, PartialEq)]
pub enum SampleData {
    /// 8-bit unsigned samples
    U8(Vec<u8>),
    /// 16-bit unsigned samples
    U16(Vec<u16>),
    /// 32-bit unsigned samples
    U32(Vec<u32>),
    /// Half-float samples
    Half(Vec<f16>),
    /// Float samples
    Float(Vec<f32>),
}

impl SampleData {
    /// Get the number of samples
    pub fn len(&self) -> usize {
        match self {
            SampleData::U8(d) => d.len(),
            SampleData::U16(d) => d.len(),
            SampleData::U32(d) => d.len(),
            SampleData::Half(d) => d.len(),
            SampleData::Float(d) => d.len(),
        }
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Storage type of the samples
    pub fn component_type(&self) -> ComponentType {
        match self {
            SampleData::U8(_) => ComponentType::U8,
            SampleData::U16(_) => ComponentType::U16,
            SampleData::U32(_) => ComponentType::U32,
            SampleData::Half(_) => ComponentType::Half,
            SampleData::Float(_) => ComponentType::Float,
        }
    }

    /// Sample at `index` as a float, integers scaled to [0,1].
    #[inline]
    pub fn normalized(&self, index: usize) -> f32 {
        match self {
            SampleData::U8(d) => d[index] as f32 / u8::MAX as f32,
            SampleData::U16(d) => d[index] as f32 / u16::MAX as f32,
            SampleData::U32(d) => (d[index] as f64 / u32::MAX as f64) as f32,
            SampleData::Half(d) => d[index].to_f32(),
            SampleData::Float(d) => d[index],
        }
    }

    /// Sample at `index` read as a palette index.
    #[inline]
    fn palette_index(&self, index: usize) -> usize {
        match self {
            SampleData::U8(d) => d[index] as usize,
            _ => 0,
        }
    }
}

/// Internal buffer data
#[derive(Debug)]
struct BufferData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Storage format
    format: PixelFormat,
    /// Color table for indexed formats
    palette: Option<Palette>,
    /// Interleaved samples, row-major
    samples: SampleData,
}

/// In-memory pixel region
///
/// # Examples
///
/// ```
/// use tonal_core::{ColorModel, ComponentType, PixelBuffer, PixelFormat, Trc};
///
/// let format = PixelFormat::new(ColorModel::Gray, Trc::Perceptual, ComponentType::U8);
/// let buffer = PixelBuffer::from_u8(4, 2, format, vec![0; 8]).unwrap();
/// assert_eq!(buffer.width(), 4);
/// assert_eq!(buffer.height(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    inner: Arc<BufferData>,
    chunk_len: usize,
}

impl PixelBuffer {
    /// Create a buffer from interleaved samples.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is 0, if the storage type differs
    /// from `format.component`, if the sample count is not
    /// `width * height * components`, or if `format` is indexed (use
    /// [`PixelBuffer::new_indexed`]).
    pub fn new(width: u32, height: u32, format: PixelFormat, samples: SampleData) -> Result<Self> {
        if format.is_palette() {
            return Err(Error::PaletteRequired(format));
        }
        Self::build(width, height, format, None, samples)
    }

    /// Create a palette-indexed buffer.
    ///
    /// The format is [`PixelFormat::indexed`], with alpha when any palette
    /// entry is translucent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if an index has no palette entry.
    pub fn new_indexed(width: u32, height: u32, palette: Palette, indices: Vec<u8>) -> Result<Self> {
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= palette.len()) {
            return Err(Error::IndexOutOfBounds {
                index: bad as usize,
                len: palette.len(),
            });
        }
        let format = PixelFormat::indexed(palette.has_alpha());
        Self::build(width, height, format, Some(palette), SampleData::U8(indices))
    }

    /// Create a buffer from 8-bit samples.
    pub fn from_u8(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        Self::new(width, height, format, SampleData::U8(data))
    }

    /// Create a buffer from 16-bit samples.
    pub fn from_u16(width: u32, height: u32, format: PixelFormat, data: Vec<u16>) -> Result<Self> {
        Self::new(width, height, format, SampleData::U16(data))
    }

    /// Create a buffer from half-float samples.
    pub fn from_half(width: u32, height: u32, format: PixelFormat, data: Vec<f16>) -> Result<Self> {
        Self::new(width, height, format, SampleData::Half(data))
    }

    /// Create a buffer from float samples.
    pub fn from_f32(width: u32, height: u32, format: PixelFormat, data: Vec<f32>) -> Result<Self> {
        Self::new(width, height, format, SampleData::Float(data))
    }

    fn build(
        width: u32,
        height: u32,
        format: PixelFormat,
        palette: Option<Palette>,
        samples: SampleData,
    ) -> Result<Self> {
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(Error::InvalidDimension { width, height });
        }
        if samples.component_type() != format.component {
            return Err(Error::ComponentMismatch {
                expected: format.component,
                actual: samples.component_type(),
            });
        }
        let expected = width as usize * height as usize * format.n_components();
        if samples.len() != expected {
            return Err(Error::DataLengthMismatch {
                expected,
                actual: samples.len(),
            });
        }

        let inner = BufferData {
            width,
            height,
            format,
            palette,
            samples,
        };

        Ok(PixelBuffer {
            inner: Arc::new(inner),
            chunk_len: DEFAULT_CHUNK_LEN,
        })
    }

    /// Set the maximum number of pixels per scanned chunk (at least 1).
    pub fn with_chunk_len(mut self, chunk_len: usize) -> Self {
        self.chunk_len = chunk_len.max(1);
        self
    }

    /// Get the width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the palette, if the buffer is indexed.
    #[inline]
    pub fn palette(&self) -> Option<&Palette> {
        self.inner.palette.as_ref()
    }

    /// Get the raw sample storage.
    #[inline]
    pub fn samples(&self) -> &SampleData {
        &self.inner.samples
    }

    /// Get the maximum number of pixels per scanned chunk.
    #[inline]
    pub fn chunk_len(&self) -> usize {
        self.chunk_len
    }

    fn convert_span(&self, converter: &Converter<'_>, x: u32, y: u32, len: usize) -> Vec<f32> {
        let n = self.inner.format.n_components();
        let start = (y as usize * self.inner.width as usize + x as usize) * n;
        let mut out = Vec::with_capacity(len * converter.n_components());
        for i in 0..len {
            converter.convert_pixel(&self.inner.samples, start + i * n, &mut out);
        }
        out
    }
}

impl PixelRegion for PixelBuffer {
    fn format(&self) -> PixelFormat {
        self.inner.format
    }

    fn extent(&self) -> Rect {
        Rect::from_size(self.inner.width, self.inner.height)
    }

    fn read_chunks(&self, rect: &Rect, target: FloatFormat) -> Result<ChunkIter<'_>> {
        check_rect(rect, &self.extent())?;
        let converter = Converter::new(self.inner.format, self.palette(), target)?;

        let rect = *rect;
        let chunk_len = self.chunk_len;
        let max_span = i32::try_from(chunk_len).unwrap_or(i32::MAX);
        let spans = (rect.y..rect.bottom()).flat_map(move |y| {
            (rect.x..rect.right()).step_by(chunk_len).map(move |x| {
                let len = (rect.right() - x).min(max_span);
                (x as u32, y as u32, len as usize)
            })
        });

        Ok(Box::new(spans.map(move |(x, y, len)| {
            self.convert_span(&converter, x, y, len)
        })))
    }
}
