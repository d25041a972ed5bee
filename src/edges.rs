//! Canny edge detection.

use image::RgbImage;
use imageproc::edges::canny;

use crate::error::{Error, Result};

/// Detect edges with the Canny algorithm.
///
/// The image is converted to grayscale, run through `imageproc`'s Canny
/// implementation with the given hysteresis thresholds, and the binary edge
/// map is rendered back to RGB (white edges on black).
///
/// Thresholds are in `[0, 255]`; `low` should not exceed `high`, and the two
/// are swapped if it does rather than rejected.
///
/// # Errors
///
/// Returns [`Error::EmptyImage`] for a zero-area image.
pub fn detect_edges(image: &RgbImage, low: f32, high: f32) -> Result<RgbImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage { width, height });
    }

    let (low, high) = if low <= high { (low, high) } else { (high, low) };
    let gray = image::DynamicImage::ImageRgb8(image.clone()).to_luma8();
    let edges = canny(&gray, low, high);

    Ok(image::DynamicImage::ImageLuma8(edges).to_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn blank_image_has_no_edges() {
        let img = RgbImage::from_pixel(32, 32, Rgb([60, 60, 60]));
        let out = detect_edges(&img, 100.0, 200.0).unwrap();
        assert_eq!(out.dimensions(), (32, 32));
        for px in out.pixels() {
            assert_eq!(px.0, [0, 0, 0]);
        }
    }

    #[test]
    fn strong_vertical_edge_is_found() {
        let mut img = RgbImage::from_pixel(32, 32, Rgb([0, 0, 0]));
        for y in 0..32 {
            for x in 16..32 {
                img.put_pixel(x, y, Rgb([255, 255, 255]));
            }
        }
        let out = detect_edges(&img, 50.0, 100.0).unwrap();
        let hits = out
            .pixels()
            .filter(|px| px.0 == [255, 255, 255])
            .count();
        assert!(hits > 10, "expected an edge column, found {hits} edge pixels");
    }

    #[test]
    fn swapped_thresholds_behave_like_ordered_ones() {
        let mut img = RgbImage::from_pixel(24, 24, Rgb([0, 0, 0]));
        for y in 0..24 {
            for x in 12..24 {
                img.put_pixel(x, y, Rgb([255, 255, 255]));
            }
        }
        let ordered = detect_edges(&img, 50.0, 150.0).unwrap();
        let swapped = detect_edges(&img, 150.0, 50.0).unwrap();
        assert_eq!(ordered, swapped);
    }

    #[test]
    fn empty_image_is_rejected() {
        let empty = RgbImage::new(0, 0);
        assert!(matches!(
            detect_edges(&empty, 100.0, 200.0),
            Err(Error::EmptyImage { .. })
        ));
    }
}
