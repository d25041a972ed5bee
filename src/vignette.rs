//! Radial vignette effect.
//!
//! Builds a per-pixel mask from each pixel's normalized distance to the image
//! center and multiplies it into every color channel:
//!
//! `w(x,y) = clamp(cos(nd(x,y) * PI * intensity), 0, 1)`
//!
//! where `nd` is the Euclidean distance to the center divided by the
//! center-to-corner distance. At `intensity = 0` the mask is uniformly 1 and
//! the image is returned unchanged; at `intensity = 1` the far corners go
//! fully black. Intensities above 1 push the cosine past `PI` over a larger
//! fraction of the image and darken more aggressively; the mask is clamped,
//! the intensity input never is.

use std::f32::consts::PI;

use image::RgbImage;

use crate::error::{Error, Result};

/// Compute the vignette mask for an image of the given dimensions.
///
/// Returns a flat row-major `Vec<f32>` of length `width * height` with every
/// weight in `[0, 1]`. The mask is recomputed per call and holds no state.
///
/// # Errors
///
/// Returns [`Error::EmptyImage`] if `width` or `height` is zero (the
/// center-to-corner distance would be zero and normalization would divide
/// by it).
pub fn vignette_mask(width: u32, height: u32, intensity: f32) -> Result<Vec<f32>> {
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage { width, height });
    }

    #[allow(clippy::cast_precision_loss)]
    let (center_x, center_y) = (width as f32 / 2.0, height as f32 / 2.0);
    let max_distance = (center_x * center_x + center_y * center_y).sqrt();

    let mut mask = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            #[allow(clippy::cast_precision_loss)]
            let (dx, dy) = (x as f32 - center_x, y as f32 - center_y);
            let normalized = (dx * dx + dy * dy).sqrt() / max_distance;
            let weight = (normalized * PI * intensity).cos();
            mask.push(weight.clamp(0.0, 1.0));
        }
    }

    Ok(mask)
}

/// Apply a vignette to an image, returning a new image of the same size.
///
/// All three channels of a pixel are scaled by the identical mask weight, so
/// color ratios are preserved and only luminance changes. Channel values are
/// clamped into `[0, 255]` after scaling.
///
/// # Errors
///
/// Returns [`Error::EmptyImage`] for a zero-area image. No other input can
/// fail; out-of-range intensities are handled by the mask clamp.
pub fn vignette(image: &RgbImage, intensity: f32) -> Result<RgbImage> {
    let (width, height) = image.dimensions();
    let mask = vignette_mask(width, height, intensity)?;

    let mut out = image.clone();
    for (y, row) in out.rows_mut().enumerate() {
        for (x, px) in row.enumerate() {
            let weight = mask[y * width as usize + x];
            for ch in 0..3 {
                let scaled = f32::from(px[ch]) * weight;
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                {
                    px[ch] = scaled.clamp(0.0, 255.0) as u8;
                }
            }
        }
    }

    Ok(out)
}
