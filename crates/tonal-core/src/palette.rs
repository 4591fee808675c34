//! Palette - Color table for indexed buffers
//!
//! Maps 8-bit indices to perceptually encoded RGBA colors.

use crate::error::{Error, Result};

/// Maximum number of palette entries addressable by an 8-bit index
pub const MAX_PALETTE_ENTRIES: usize = 256;

/// RGBA color entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RgbaQuad {
    /// Red component
    pub red: u8,
    /// Green component
    pub green: u8,
    /// Blue component
    pub blue: u8,
    /// Alpha component
    pub alpha: u8,
}

impl RgbaQuad {
    /// Create a new RGBA color
    pub fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Create an RGB color (alpha = 255)
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 255)
    }

    /// Create a grayscale color
    pub fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    /// Check whether the color is fully opaque
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.alpha == 255
    }
}

/// Color table for indexed buffers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<RgbaQuad>,
}

impl Palette {
    /// Create an empty palette
    pub fn new() -> Self {
        Self { colors: Vec::new() }
    }

    /// Create a palette from a list of colors
    ///
    /// # Errors
    ///
    /// Returns [`Error::PaletteFull`] if more than 256 colors are given.
    pub fn from_colors(colors: Vec<RgbaQuad>) -> Result<Self> {
        if colors.len() > MAX_PALETTE_ENTRIES {
            return Err(Error::PaletteFull(colors.len()));
        }
        Ok(Self { colors })
    }

    /// Get the number of colors
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Get a color by index
    pub fn get(&self, index: usize) -> Option<&RgbaQuad> {
        self.colors.get(index)
    }

    /// Add a color, returning its index
    pub fn add_color(&mut self, color: RgbaQuad) -> Result<usize> {
        if self.colors.len() >= MAX_PALETTE_ENTRIES {
            return Err(Error::PaletteFull(self.colors.len()));
        }
        self.colors.push(color);
        Ok(self.colors.len() - 1)
    }

    /// Check whether any entry is translucent
    pub fn has_alpha(&self) -> bool {
        self.colors.iter().any(|c| !c.is_opaque())
    }

    /// Get all colors
    pub fn colors(&self) -> &[RgbaQuad] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_add() {
        let mut palette = Palette::new();
        assert!(palette.is_empty());
        assert_eq!(palette.add_color(RgbaQuad::rgb(255, 0, 0)).unwrap(), 0);
        assert_eq!(palette.add_color(RgbaQuad::new(0, 0, 255, 128)).unwrap(), 1);
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.get(0), Some(&RgbaQuad::rgb(255, 0, 0)));
        assert!(palette.get(2).is_none());
        assert!(palette.has_alpha());
    }

    #[test]
    fn test_palette_full() {
        let mut palette = Palette::from_colors(vec![RgbaQuad::gray(7); 256]).unwrap();
        assert_eq!(palette.len(), 256);
        assert!(!palette.has_alpha());
        assert!(palette.add_color(RgbaQuad::rgb(1, 2, 3)).is_err());
        assert!(Palette::from_colors(vec![RgbaQuad::default(); 257]).is_err());
    }
}
