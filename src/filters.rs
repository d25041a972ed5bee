//! Fixed-kernel convolution filters.
//!
//! The classic toolbox set: blur, contour, emboss, edge enhance, smooth,
//! sharpen. Each is a small integer kernel with a scale divisor and an
//! additive offset. Only the interior is convolved; the border ring (one
//! pixel for 3x3 kernels, two for 5x5) keeps its original values, matching
//! the smoothing pass in [`crate::enhance`].

use image::{Rgb, RgbImage};
use imageproc::filter::Kernel;

/// The available fixed filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// 5x5 ring blur.
    Blur,
    /// Edge outline on a white background.
    Contour,
    /// Relief effect biased around mid-gray.
    Emboss,
    /// Edge-boosting sharpener.
    EdgeEnhance,
    /// Gentle 3x3 smoothing.
    Smooth,
    /// Aggressive 3x3 sharpening.
    Sharpen,
}

struct FilterSpec {
    weights: &'static [f32],
    width: u32,
    height: u32,
    scale: f32,
    offset: f32,
}

#[rustfmt::skip]
const BLUR_WEIGHTS: [f32; 25] = [
    1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 0.0, 0.0, 0.0, 1.0,
    1.0, 0.0, 0.0, 0.0, 1.0,
    1.0, 0.0, 0.0, 0.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0,
];
#[rustfmt::skip]
const CONTOUR_WEIGHTS: [f32; 9] = [
    -1.0, -1.0, -1.0,
    -1.0,  8.0, -1.0,
    -1.0, -1.0, -1.0,
];
#[rustfmt::skip]
const EMBOSS_WEIGHTS: [f32; 9] = [
    -1.0, 0.0, 0.0,
     0.0, 1.0, 0.0,
     0.0, 0.0, 0.0,
];
#[rustfmt::skip]
const EDGE_ENHANCE_WEIGHTS: [f32; 9] = [
    -1.0, -1.0, -1.0,
    -1.0, 10.0, -1.0,
    -1.0, -1.0, -1.0,
];
#[rustfmt::skip]
const SMOOTH_WEIGHTS: [f32; 9] = [
    1.0, 1.0, 1.0,
    1.0, 5.0, 1.0,
    1.0, 1.0, 1.0,
];
#[rustfmt::skip]
const SHARPEN_WEIGHTS: [f32; 9] = [
    -2.0, -2.0, -2.0,
    -2.0, 32.0, -2.0,
    -2.0, -2.0, -2.0,
];

fn spec(kind: FilterKind) -> FilterSpec {
    match kind {
        FilterKind::Blur => FilterSpec {
            weights: &BLUR_WEIGHTS,
            width: 5,
            height: 5,
            scale: 16.0,
            offset: 0.0,
        },
        FilterKind::Contour => FilterSpec {
            weights: &CONTOUR_WEIGHTS,
            width: 3,
            height: 3,
            scale: 1.0,
            offset: 255.0,
        },
        FilterKind::Emboss => FilterSpec {
            weights: &EMBOSS_WEIGHTS,
            width: 3,
            height: 3,
            scale: 1.0,
            offset: 128.0,
        },
        FilterKind::EdgeEnhance => FilterSpec {
            weights: &EDGE_ENHANCE_WEIGHTS,
            width: 3,
            height: 3,
            scale: 2.0,
            offset: 0.0,
        },
        FilterKind::Smooth => FilterSpec {
            weights: &SMOOTH_WEIGHTS,
            width: 3,
            height: 3,
            scale: 13.0,
            offset: 0.0,
        },
        FilterKind::Sharpen => FilterSpec {
            weights: &SHARPEN_WEIGHTS,
            width: 3,
            height: 3,
            scale: 16.0,
            offset: 0.0,
        },
    }
}

/// Apply a fixed filter, returning a new image of the same dimensions.
///
/// The border ring the kernel cannot fully cover is copied from the input
/// unchanged. Images smaller than the kernel are returned as-is.
#[must_use]
pub fn filter(image: &RgbImage, kind: FilterKind) -> RgbImage {
    let spec = spec(kind);
    let (width, height) = image.dimensions();
    let mut out = image.clone();
    if width < spec.width || height < spec.height {
        return out;
    }

    let kernel = Kernel::new(spec.weights, spec.width, spec.height);
    let accumulated: image::ImageBuffer<Rgb<f32>, Vec<f32>> =
        kernel.filter(image, |channel, acc| *channel = acc);

    let margin = spec.width / 2;
    for y in margin..height - margin {
        for x in margin..width - margin {
            let src = accumulated.get_pixel(x, y);
            let dst = out.get_pixel_mut(x, y);
            for ch in 0..3 {
                let value = src[ch] / spec.scale + spec.offset;
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                {
                    dst[ch] = value.clamp(0.0, 255.0) as u8;
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [FilterKind; 6] = [
        FilterKind::Blur,
        FilterKind::Contour,
        FilterKind::Emboss,
        FilterKind::EdgeEnhance,
        FilterKind::Smooth,
        FilterKind::Sharpen,
    ];

    #[test]
    fn filters_preserve_dimensions() {
        let img = RgbImage::new(17, 11);
        for kind in ALL {
            assert_eq!(filter(&img, kind).dimensions(), (17, 11));
        }
    }

    #[test]
    fn normalized_kernels_are_identity_on_uniform_images() {
        // Weights sum to the scale for blur/smooth/sharpen/edge-enhance,
        // so a flat image passes through unchanged.
        let img = RgbImage::from_pixel(12, 12, Rgb([96, 160, 224]));
        for kind in [
            FilterKind::Blur,
            FilterKind::Smooth,
            FilterKind::Sharpen,
            FilterKind::EdgeEnhance,
        ] {
            let out = filter(&img, kind);
            assert_eq!(
                *out.get_pixel(6, 6),
                Rgb([96, 160, 224]),
                "{kind:?} changed a flat image"
            );
        }
    }

    #[test]
    fn contour_of_flat_image_is_white() {
        // Zero response plus the 255 offset.
        let img = RgbImage::from_pixel(8, 8, Rgb([80, 80, 80]));
        let out = filter(&img, FilterKind::Contour);
        assert_eq!(out.get_pixel(4, 4).0, [255, 255, 255]);
    }

    #[test]
    fn emboss_of_flat_image_is_mid_gray() {
        // The two weights cancel, leaving only the 128 offset.
        let img = RgbImage::from_pixel(8, 8, Rgb([200, 33, 90]));
        let out = filter(&img, FilterKind::Emboss);
        assert_eq!(out.get_pixel(4, 4).0, [128, 128, 128]);
    }

    #[test]
    fn smooth_pulls_an_outlier_toward_its_neighbors() {
        let mut img = RgbImage::from_pixel(9, 9, Rgb([100, 100, 100]));
        img.put_pixel(4, 4, Rgb([255, 255, 255]));
        let out = filter(&img, FilterKind::Smooth);
        let v = out.get_pixel(4, 4)[0];
        assert!(v < 255 && v > 100, "smoothed outlier was {v}");
    }

    #[test]
    fn border_ring_keeps_input_values() {
        // Contour's 255 offset rewrites every convolved pixel, so any
        // border pixel still matching the input proves it was copied.
        let mut img = RgbImage::new(9, 7);
        for (x, y, px) in img.enumerate_pixels_mut() {
            let v = (x * 20 + y * 10) as u8;
            *px = Rgb([v, v, v]);
        }
        let out = filter(&img, FilterKind::Contour);
        for (x, y, px) in img.enumerate_pixels() {
            if x == 0 || y == 0 || x == 8 || y == 6 {
                assert_eq!(out.get_pixel(x, y), px, "border changed at ({x}, {y})");
            }
        }

        // Blur is 5x5, so its untouched ring is two pixels wide.
        let out = filter(&img, FilterKind::Blur);
        for (x, y, px) in img.enumerate_pixels() {
            if x < 2 || y < 2 || x >= 7 || y >= 5 {
                assert_eq!(out.get_pixel(x, y), px, "blur ring changed at ({x}, {y})");
            }
        }
    }

    #[test]
    fn image_smaller_than_kernel_is_unchanged() {
        let img = RgbImage::from_pixel(4, 3, Rgb([10, 20, 30]));
        assert_eq!(filter(&img, FilterKind::Blur), img);
    }

    #[test]
    fn sharpen_widens_an_edge_contrast() {
        let mut img = RgbImage::from_pixel(10, 10, Rgb([100, 100, 100]));
        for y in 0..10 {
            for x in 5..10 {
                img.put_pixel(x, y, Rgb([180, 180, 180]));
            }
        }
        let out = filter(&img, FilterKind::Sharpen);
        // Dark side of the edge gets darker, bright side brighter.
        assert!(out.get_pixel(4, 5)[0] < 100);
        assert!(out.get_pixel(5, 5)[0] > 180);
    }
}
