//! Pixel formats
//!
//! A [`PixelFormat`] describes how a source buffer stores its samples:
//! the color model, the tone response curve and the per-component
//! storage type. A [`FloatFormat`] describes the interleaved `f32`
//! encoding a region is asked to deliver when it is scanned.
//!
//! Format names follow the usual prime convention: a primed component
//! (`Y'`, `R'G'B'`) is perceptually encoded, an unprimed one is linear.

use std::fmt;

/// Per-component storage type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// 8-bit unsigned integer
    U8,
    /// 16-bit unsigned integer
    U16,
    /// 32-bit unsigned integer
    U32,
    /// 16-bit IEEE half float
    Half,
    /// 32-bit IEEE float
    Float,
}

impl ComponentType {
    /// Get the number of bits used for one component.
    pub fn bits(self) -> u32 {
        match self {
            ComponentType::U8 => 8,
            ComponentType::U16 | ComponentType::Half => 16,
            ComponentType::U32 | ComponentType::Float => 32,
        }
    }

    /// Check whether this is an integer type.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            ComponentType::U8 | ComponentType::U16 | ComponentType::U32
        )
    }

    fn name(self) -> &'static str {
        match self {
            ComponentType::U8 => "u8",
            ComponentType::U16 => "u16",
            ComponentType::U32 => "u32",
            ComponentType::Half => "half",
            ComponentType::Float => "float",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tone response curve of the color components
///
/// Alpha is always linear regardless of the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Trc {
    /// Linear light
    #[default]
    Linear,
    /// Perceptual (sRGB) encoding
    Perceptual,
}

/// Color model of a source buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorModel {
    /// Single gray channel
    Gray,
    /// Gray plus alpha
    GrayAlpha,
    /// Red, green, blue
    Rgb,
    /// Red, green, blue, alpha
    Rgba,
    /// Palette indices, opaque palette
    Indexed,
    /// Palette indices, palette carries alpha
    IndexedAlpha,
    /// Cyan, magenta, yellow, key
    Cmyk,
    /// CIE L*a*b*
    Lab,
}

impl ColorModel {
    /// Number of components stored per pixel.
    ///
    /// Indexed models store a single palette index.
    pub fn n_components(self) -> usize {
        match self {
            ColorModel::Gray | ColorModel::Indexed | ColorModel::IndexedAlpha => 1,
            ColorModel::GrayAlpha => 2,
            ColorModel::Rgb | ColorModel::Lab => 3,
            ColorModel::Rgba | ColorModel::Cmyk => 4,
        }
    }

    /// Check whether pixels carry alpha (stored or through the palette).
    pub fn has_alpha(self) -> bool {
        matches!(
            self,
            ColorModel::GrayAlpha | ColorModel::Rgba | ColorModel::IndexedAlpha
        )
    }

    /// Check whether samples are palette indices.
    pub fn is_palette(self) -> bool {
        matches!(self, ColorModel::Indexed | ColorModel::IndexedAlpha)
    }
}

/// Storage format of a source buffer
///
/// # Examples
///
/// ```
/// use tonal_core::{ColorModel, ComponentType, PixelFormat, Trc};
///
/// let format = PixelFormat::new(ColorModel::Rgba, Trc::Perceptual, ComponentType::U8);
/// assert_eq!(format.n_components(), 4);
/// assert_eq!(format.to_string(), "R'G'B'A u8");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelFormat {
    /// Color model
    pub model: ColorModel,
    /// Tone response curve of the color components
    pub trc: Trc,
    /// Storage type of each component
    pub component: ComponentType,
}

impl PixelFormat {
    /// Create a new pixel format.
    pub const fn new(model: ColorModel, trc: Trc, component: ComponentType) -> Self {
        Self {
            model,
            trc,
            component,
        }
    }

    /// Create an 8-bit palette-indexed format.
    ///
    /// Palette colors are perceptually encoded.
    pub const fn indexed(has_alpha: bool) -> Self {
        let model = if has_alpha {
            ColorModel::IndexedAlpha
        } else {
            ColorModel::Indexed
        };
        Self::new(model, Trc::Perceptual, ComponentType::U8)
    }

    /// Number of components stored per pixel.
    #[inline]
    pub fn n_components(&self) -> usize {
        self.model.n_components()
    }

    /// Check whether pixels carry alpha.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.model.has_alpha()
    }

    /// Check whether samples are palette indices.
    #[inline]
    pub fn is_palette(&self) -> bool {
        self.model.is_palette()
    }

    /// Check whether the color components are perceptually encoded.
    #[inline]
    pub fn is_perceptual(&self) -> bool {
        self.trc == Trc::Perceptual
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let perceptual = self.is_perceptual();
        let model = match self.model {
            ColorModel::Gray if perceptual => "Y'",
            ColorModel::Gray => "Y",
            ColorModel::GrayAlpha if perceptual => "Y'A",
            ColorModel::GrayAlpha => "YA",
            ColorModel::Rgb if perceptual => "R'G'B'",
            ColorModel::Rgb => "RGB",
            ColorModel::Rgba if perceptual => "R'G'B'A",
            ColorModel::Rgba => "RGBA",
            ColorModel::Indexed => "indexed",
            ColorModel::IndexedAlpha => "indexed-alpha",
            ColorModel::Cmyk => "CMYK",
            ColorModel::Lab => "CIE Lab",
        };
        write!(f, "{} {}", model, self.component)
    }
}

/// Component layout of a float encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatLayout {
    /// Gray
    Y,
    /// Gray plus alpha
    YA,
    /// Red, green, blue
    Rgb,
    /// Red, green, blue, alpha
    Rgba,
}

impl FloatLayout {
    /// Number of interleaved components per pixel.
    pub fn n_components(self) -> usize {
        match self {
            FloatLayout::Y => 1,
            FloatLayout::YA => 2,
            FloatLayout::Rgb => 3,
            FloatLayout::Rgba => 4,
        }
    }

    /// Check whether the last component is alpha.
    pub fn has_alpha(self) -> bool {
        matches!(self, FloatLayout::YA | FloatLayout::Rgba)
    }
}

/// Interleaved `f32` encoding requested from a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloatFormat {
    /// Component layout
    pub layout: FloatLayout,
    /// Tone response curve of the color components
    pub trc: Trc,
}

impl FloatFormat {
    /// Create a new float format.
    pub const fn new(layout: FloatLayout, trc: Trc) -> Self {
        Self { layout, trc }
    }

    /// Linear single-channel float, the encoding used for masks.
    pub const fn mask() -> Self {
        Self::new(FloatLayout::Y, Trc::Linear)
    }

    /// Number of interleaved components per pixel.
    #[inline]
    pub fn n_components(&self) -> usize {
        self.layout.n_components()
    }

    /// Check whether the last component is alpha.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.layout.has_alpha()
    }

    /// Check whether the color components are perceptually encoded.
    #[inline]
    pub fn is_perceptual(&self) -> bool {
        self.trc == Trc::Perceptual
    }
}

impl fmt::Display for FloatFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let perceptual = self.is_perceptual();
        let layout = match self.layout {
            FloatLayout::Y if perceptual => "Y'",
            FloatLayout::Y => "Y",
            FloatLayout::YA if perceptual => "Y'A",
            FloatLayout::YA => "YA",
            FloatLayout::Rgb if perceptual => "R'G'B'",
            FloatLayout::Rgb => "RGB",
            FloatLayout::Rgba if perceptual => "R'G'B'A",
            FloatLayout::Rgba => "RGBA",
        };
        write!(f, "{} float", layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_counts() {
        assert_eq!(ColorModel::Gray.n_components(), 1);
        assert_eq!(ColorModel::GrayAlpha.n_components(), 2);
        assert_eq!(ColorModel::Rgb.n_components(), 3);
        assert_eq!(ColorModel::Rgba.n_components(), 4);
        assert_eq!(ColorModel::IndexedAlpha.n_components(), 1);
        assert_eq!(ColorModel::Cmyk.n_components(), 4);
    }

    #[test]
    fn test_indexed_format() {
        let opaque = PixelFormat::indexed(false);
        assert!(opaque.is_palette());
        assert!(!opaque.has_alpha());
        assert_eq!(opaque.component, ComponentType::U8);

        let alpha = PixelFormat::indexed(true);
        assert!(alpha.has_alpha());
        assert_eq!(alpha.model, ColorModel::IndexedAlpha);
    }

    #[test]
    fn test_format_names() {
        let gray = PixelFormat::new(ColorModel::Gray, Trc::Linear, ComponentType::U16);
        assert_eq!(gray.to_string(), "Y u16");
        let rgb = PixelFormat::new(ColorModel::Rgb, Trc::Perceptual, ComponentType::Half);
        assert_eq!(rgb.to_string(), "R'G'B' half");
        let float = FloatFormat::new(FloatLayout::YA, Trc::Perceptual);
        assert_eq!(float.to_string(), "Y'A float");
        assert_eq!(FloatFormat::mask().to_string(), "Y float");
    }

    #[test]
    fn test_component_bits() {
        assert_eq!(ComponentType::U8.bits(), 8);
        assert_eq!(ComponentType::Half.bits(), 16);
        assert_eq!(ComponentType::Float.bits(), 32);
        assert!(ComponentType::U32.is_integer());
        assert!(!ComponentType::Float.is_integer());
    }
}
