//! sRGB tone response curves
//!
//! Conversion between linear light and perceptual encoding, per
//! IEC 61966-2-1. Applied to color components only; alpha is linear in
//! every format.

use crate::format::Trc;

/// Inverse sRGB EOTF: linear light [0,1] -> perceptual [0,1].
pub fn linear_to_srgb(x: f32) -> f32 {
    if x <= 0.003_130_8 {
        12.92 * x
    } else {
        1.055 * x.powf(1.0 / 2.4) - 0.055
    }
}

/// sRGB EOTF: perceptual [0,1] -> linear light [0,1].
pub fn srgb_to_linear(x: f32) -> f32 {
    if x <= 0.040_45 {
        x / 12.92
    } else {
        ((x + 0.055) / 1.055).powf(2.4)
    }
}

/// Re-encode a color component from one curve to another.
#[inline]
pub fn convert_trc(x: f32, from: Trc, to: Trc) -> f32 {
    match (from, to) {
        (Trc::Linear, Trc::Perceptual) => linear_to_srgb(x),
        (Trc::Perceptual, Trc::Linear) => srgb_to_linear(x),
        _ => x,
    }
}
