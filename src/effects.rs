//! Color effects: grayscale, sepia, negative, black & white.

use image::{Rgb, RgbImage};

/// Sepia tone matrix, applied as `out = M * [r, g, b]` and clamped.
const SEPIA_MATRIX: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Black & white luminance cutoff.
const BW_THRESHOLD: f32 = 128.0;

/// The available color effects, as presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorEffect {
    /// Luminance-weighted grayscale.
    Grayscale,
    /// Warm sepia tone via a 3x3 color matrix.
    Sepia,
    /// Per-channel inversion.
    Negative,
    /// Hard black/white threshold on luminance.
    BlackWhite,
}

/// Rec. 601 luminance of a pixel, in `[0, 255]`.
pub(crate) fn luma(px: &Rgb<u8>) -> f32 {
    0.299 * f32::from(px[0]) + 0.587 * f32::from(px[1]) + 0.114 * f32::from(px[2])
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_u8(value: f32) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Apply a color effect, returning a new image of the same dimensions.
///
/// Grayscale and black & white replicate the single computed value into all
/// three channels so that every tool keeps producing `RgbImage`.
#[must_use]
pub fn color_effect(image: &RgbImage, effect: ColorEffect) -> RgbImage {
    let mut out = image.clone();
    match effect {
        ColorEffect::Grayscale => {
            for px in out.pixels_mut() {
                let gray = clamp_u8(luma(px).round());
                *px = Rgb([gray, gray, gray]);
            }
        }
        ColorEffect::Sepia => {
            for px in out.pixels_mut() {
                let (r, g, b) = (f32::from(px[0]), f32::from(px[1]), f32::from(px[2]));
                for (ch, row) in SEPIA_MATRIX.iter().enumerate() {
                    px[ch] = clamp_u8(row[0] * r + row[1] * g + row[2] * b);
                }
            }
        }
        ColorEffect::Negative => {
            for px in out.pixels_mut() {
                for ch in 0..3 {
                    px[ch] = 255 - px[ch];
                }
            }
        }
        ColorEffect::BlackWhite => {
            for px in out.pixels_mut() {
                let v = if luma(px) < BW_THRESHOLD { 0 } else { 255 };
                *px = Rgb([v, v, v]);
            }
        }
    }
    out
}
