//! Rotation and resizing.

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use imageproc::geometric_transformations::{warp_into, Interpolation, Projection};

use crate::error::{Error, Result};

/// Target dimensions for a resize. A single given dimension scales the other
/// by the original aspect ratio; both given resizes exactly; neither given is
/// the identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResizeSpec {
    /// Target width in pixels.
    pub width: Option<u32>,
    /// Target height in pixels.
    pub height: Option<u32>,
}

/// Rotate counter-clockwise by `degrees`, expanding the canvas to the
/// rotated bounding box. Uncovered canvas is filled black.
///
/// Multiples of 90 degrees take a lossless fast path; anything else is a
/// projective warp with bilinear sampling, chosen over nearest-neighbor
/// to avoid jagged edges at arbitrary angles.
///
/// # Errors
///
/// Returns [`Error::EmptyImage`] for a zero-area image.
pub fn rotate(image: &RgbImage, degrees: f32) -> Result<RgbImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage { width, height });
    }

    let normalized = degrees.rem_euclid(360.0);
    if normalized == 0.0 {
        return Ok(image.clone());
    }
    if normalized == 90.0 {
        // `image`'s rotations are clockwise; 270 CW = 90 CCW.
        return Ok(imageops::rotate270(image));
    }
    if normalized == 180.0 {
        return Ok(imageops::rotate180(image));
    }
    if normalized == 270.0 {
        return Ok(imageops::rotate90(image));
    }

    let radians = normalized.to_radians();
    let (sin, cos) = (radians.sin().abs(), radians.cos().abs());
    #[allow(clippy::cast_precision_loss)]
    let (w, h) = (width as f32, height as f32);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let new_width = (w * cos + h * sin).ceil() as u32;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let new_height = (w * sin + h * cos).ceil() as u32;

    // Map input to output: recenter, rotate, recenter into the new canvas.
    // Screen coordinates have y pointing down, so a visually
    // counter-clockwise rotation is a negative mathematical angle.
    #[allow(clippy::cast_precision_loss)]
    let projection = Projection::translate(new_width as f32 / 2.0, new_height as f32 / 2.0)
        * Projection::rotate(-radians)
        * Projection::translate(-w / 2.0, -h / 2.0);

    let mut out = RgbImage::new(new_width, new_height);
    warp_into(
        image,
        &projection,
        Interpolation::Bilinear,
        Rgb([0, 0, 0]),
        &mut out,
    );
    Ok(out)
}

/// Resize according to `spec` using Lanczos3 resampling, which keeps more
/// detail when downscaling than the bicubic default of simpler resizers.
///
/// # Errors
///
/// Returns [`Error::EmptyImage`] if the source is zero-area or any requested
/// target dimension is zero.
pub fn resize(image: &RgbImage, spec: ResizeSpec) -> Result<RgbImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage { width, height });
    }

    let (target_w, target_h) = match (spec.width, spec.height) {
        (Some(w), Some(h)) => (w, h),
        (Some(w), None) => {
            #[allow(clippy::cast_precision_loss)]
            let ratio = w as f32 / width as f32;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let h = ((height as f32 * ratio) as u32).max(1);
            (w, h)
        }
        (None, Some(h)) => {
            #[allow(clippy::cast_precision_loss)]
            let ratio = h as f32 / height as f32;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let w = ((width as f32 * ratio) as u32).max(1);
            (w, h)
        }
        (None, None) => return Ok(image.clone()),
    };

    if target_w == 0 || target_h == 0 {
        return Err(Error::EmptyImage {
            width: target_w,
            height: target_h,
        });
    }

    Ok(imageops::resize(
        image,
        target_w,
        target_h,
        FilterType::Lanczos3,
    ))
}
