//! Synthetic pixel buffers used across regression tests

use crate::error::{TestError, TestResult};
use tonal_core::{ColorModel, ComponentType, PixelBuffer, PixelFormat, Trc};

/// 8-bit perceptual gray
pub const GRAY_U8: PixelFormat =
    PixelFormat::new(ColorModel::Gray, Trc::Perceptual, ComponentType::U8);

/// 8-bit linear gray, the natural mask format
pub const MASK_U8: PixelFormat =
    PixelFormat::new(ColorModel::Gray, Trc::Linear, ComponentType::U8);

/// 8-bit perceptual RGB
pub const RGB_U8: PixelFormat =
    PixelFormat::new(ColorModel::Rgb, Trc::Perceptual, ComponentType::U8);

/// 8-bit perceptual RGBA
pub const RGBA_U8: PixelFormat =
    PixelFormat::new(ColorModel::Rgba, Trc::Perceptual, ComponentType::U8);

fn build(
    name: &'static str,
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
) -> TestResult<PixelBuffer> {
    PixelBuffer::from_u8(width, height, format, data)
        .map_err(|source| TestError::Fixture { name, source })
}

/// Gray buffer with every pixel set to `value`
pub fn uniform_gray(width: u32, height: u32, value: u8) -> TestResult<PixelBuffer> {
    let data = vec![value; (width * height) as usize];
    build("uniform_gray", width, height, GRAY_U8, data)
}

/// Gray buffer whose columns step evenly from 0 to 255
pub fn gradient_gray(width: u32, height: u32) -> TestResult<PixelBuffer> {
    let last = width.saturating_sub(1).max(1);
    let data = (0..height)
        .flat_map(|_| (0..width).map(move |x| (x * 255 / last) as u8))
        .collect();
    build("gradient_gray", width, height, GRAY_U8, data)
}

/// Single-row gray buffer holding `n_low` pixels of `low` then `n_high`
/// pixels of `high`
pub fn two_cluster_gray(n_low: u32, low: u8, n_high: u32, high: u8) -> TestResult<PixelBuffer> {
    let mut data = vec![low; n_low as usize];
    data.extend(std::iter::repeat_n(high, n_high as usize));
    build("two_cluster_gray", n_low + n_high, 1, GRAY_U8, data)
}

/// 2x1 RGBA buffer: opaque red, then half-transparent green
pub fn rgba_pair() -> TestResult<PixelBuffer> {
    build("rgba_pair", 2, 1, RGBA_U8, vec![255, 0, 0, 255, 0, 255, 0, 128])
}

/// RGB buffer from interleaved samples
pub fn rgb(width: u32, height: u32, data: Vec<u8>) -> TestResult<PixelBuffer> {
    build("rgb", width, height, RGB_U8, data)
}

/// Linear gray mask from raw weights
pub fn mask(width: u32, height: u32, weights: Vec<u8>) -> TestResult<PixelBuffer> {
    build("mask", width, height, MASK_U8, weights)
}
