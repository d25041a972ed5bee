//! Basic enhancement: brightness, contrast, saturation, sharpness.
//!
//! Each adjustment interpolates between the image and a "degenerate" version
//! of it: black for brightness, solid mean-gray for contrast, per-pixel
//! grayscale for saturation, and a smoothed copy for sharpness. A factor of
//! 1.0 is the identity, 0.0 yields the degenerate image, and values up to
//! 2.0 push past the original. Factors are not validated; results are
//! clamped per channel.

use image::RgbImage;

use crate::effects::luma;
use crate::error::{Error, Result};

/// Enhancement factors, each in the nominal range `[0, 2]` with 1.0 = identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnhanceParams {
    /// Brightness factor (0 = black).
    pub brightness: f32,
    /// Contrast factor (0 = solid mean gray).
    pub contrast: f32,
    /// Saturation factor (0 = grayscale).
    pub saturation: f32,
    /// Sharpness factor (0 = smoothed).
    pub sharpness: f32,
}

impl Default for EnhanceParams {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0,
            sharpness: 1.0,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_u8(value: f32) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Interpolate one channel between a degenerate value and the original.
fn blend(degenerate: f32, original: f32, factor: f32) -> u8 {
    clamp_u8(degenerate + factor * (original - degenerate))
}

/// Scale every channel by `factor` (blend with black).
#[must_use]
pub fn brightness(image: &RgbImage, factor: f32) -> RgbImage {
    let mut out = image.clone();
    for px in out.pixels_mut() {
        for ch in 0..3 {
            px[ch] = blend(0.0, f32::from(px[ch]), factor);
        }
    }
    out
}

/// Blend with a solid gray image at the mean luminance.
///
/// # Errors
///
/// Returns [`Error::EmptyImage`] for a zero-area image (the mean is
/// undefined).
pub fn contrast(image: &RgbImage, factor: f32) -> Result<RgbImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage { width, height });
    }

    #[allow(clippy::cast_precision_loss)]
    let n = (width * height) as f32;
    let mean = (image.pixels().map(luma).sum::<f32>() / n).round();

    let mut out = image.clone();
    for px in out.pixels_mut() {
        for ch in 0..3 {
            px[ch] = blend(mean, f32::from(px[ch]), factor);
        }
    }
    Ok(out)
}

/// Blend with the per-pixel grayscale image.
#[must_use]
pub fn saturation(image: &RgbImage, factor: f32) -> RgbImage {
    let mut out = image.clone();
    for px in out.pixels_mut() {
        let gray = luma(px).round();
        for ch in 0..3 {
            px[ch] = blend(gray, f32::from(px[ch]), factor);
        }
    }
    out
}

/// Blend with a 3x3 smoothed copy of the image.
///
/// The smoothing kernel is `[1,1,1; 1,5,1; 1,1,1] / 13` applied to the
/// interior only; the one-pixel border keeps its original values, so border
/// pixels are unchanged at every factor.
#[must_use]
pub fn sharpness(image: &RgbImage, factor: f32) -> RgbImage {
    let (width, height) = image.dimensions();
    let smoothed = smooth_interior(image);

    let mut out = image.clone();
    for y in 0..height {
        for x in 0..width {
            let original = image.get_pixel(x, y);
            let degenerate = smoothed.get_pixel(x, y);
            let px = out.get_pixel_mut(x, y);
            for ch in 0..3 {
                px[ch] = blend(
                    f32::from(degenerate[ch]),
                    f32::from(original[ch]),
                    factor,
                );
            }
        }
    }
    out
}

/// 3x3 smooth over the interior; border rows and columns are copied through.
fn smooth_interior(image: &RgbImage) -> RgbImage {
    const KERNEL: [f32; 9] = [1.0, 1.0, 1.0, 1.0, 5.0, 1.0, 1.0, 1.0, 1.0];
    const SCALE: f32 = 13.0;

    let (width, height) = image.dimensions();
    let mut out = image.clone();
    if width < 3 || height < 3 {
        return out;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut acc = [0.0f32; 3];
            for (k, (dy, dx)) in (-1i32..=1)
                .flat_map(|dy| (-1i32..=1).map(move |dx| (dy, dx)))
                .enumerate()
            {
                #[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
                let px = image.get_pixel((x as i32 + dx) as u32, (y as i32 + dy) as u32);
                for ch in 0..3 {
                    acc[ch] += KERNEL[k] * f32::from(px[ch]);
                }
            }
            let px = out.get_pixel_mut(x, y);
            for ch in 0..3 {
                px[ch] = clamp_u8(acc[ch] / SCALE);
            }
        }
    }
    out
}

/// Apply all four enhancements in order: brightness, contrast, saturation,
/// sharpness.
///
/// # Errors
///
/// Returns [`Error::EmptyImage`] for a zero-area image.
pub fn enhance(image: &RgbImage, params: &EnhanceParams) -> Result<RgbImage> {
    let img = brightness(image, params.brightness);
    let img = contrast(&img, params.contrast)?;
    let img = saturation(&img, params.saturation);
    Ok(sharpness(&img, params.sharpness))
}
