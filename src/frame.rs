//! Solid-color border framing.

use image::{imageops, Rgb, RgbImage};

use crate::error::{Error, Result};

/// Surround the image with a solid border of `width` pixels on every side.
///
/// The output grows by `2 * width` in each dimension. A zero width returns
/// the image unchanged.
///
/// # Errors
///
/// Returns [`Error::EmptyImage`] for a zero-area source image.
pub fn add_frame(image: &RgbImage, width: u32, color: Rgb<u8>) -> Result<RgbImage> {
    let (img_w, img_h) = image.dimensions();
    if img_w == 0 || img_h == 0 {
        return Err(Error::EmptyImage {
            width: img_w,
            height: img_h,
        });
    }
    if width == 0 {
        return Ok(image.clone());
    }

    let mut out = RgbImage::from_pixel(img_w + 2 * width, img_h + 2 * width, color);
    imageops::replace(&mut out, image, i64::from(width), i64::from(width));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_grows_both_dimensions() {
        let img = RgbImage::new(30, 20);
        let out = add_frame(&img, 10, Rgb([0, 0, 0])).unwrap();
        assert_eq!(out.dimensions(), (50, 40));
    }

    #[test]
    fn border_pixels_use_the_fill_color_and_interior_survives() {
        let img = RgbImage::from_pixel(4, 4, Rgb([10, 20, 30]));
        let out = add_frame(&img, 3, Rgb([200, 0, 50])).unwrap();

        assert_eq!(out.get_pixel(0, 0).0, [200, 0, 50]);
        assert_eq!(out.get_pixel(9, 9).0, [200, 0, 50]);
        assert_eq!(out.get_pixel(1, 5).0, [200, 0, 50]);
        // Interior starts at (3, 3).
        assert_eq!(out.get_pixel(3, 3).0, [10, 20, 30]);
        assert_eq!(out.get_pixel(6, 6).0, [10, 20, 30]);
    }

    #[test]
    fn zero_width_is_identity() {
        let img = RgbImage::from_pixel(5, 5, Rgb([1, 2, 3]));
        let out = add_frame(&img, 0, Rgb([255, 255, 255])).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn empty_image_is_rejected() {
        let empty = RgbImage::new(0, 3);
        assert!(add_frame(&empty, 5, Rgb([0, 0, 0])).is_err());
    }
}
