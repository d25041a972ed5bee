//! Tool selection and file processing.
//!
//! A [`Tool`] is the "selected tool + its parameters" of the interactive
//! editor as a tagged variant; [`apply`] dispatches it to the corresponding
//! pure function. The file helpers wrap the load -> apply -> save cycle with
//! per-file results instead of panics, and batch over directories.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use crate::edges;
use crate::effects::{self, ColorEffect};
use crate::enhance::{self, EnhanceParams};
use crate::error::{Error, Result};
use crate::filters::{self, FilterKind};
use crate::frame;
use crate::geometry::{self, ResizeSpec};
use crate::vignette;
use crate::watermark::{self, WatermarkSpec};

/// One editing tool with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Tool {
    /// Brightness / contrast / saturation / sharpness adjustment.
    Enhance(EnhanceParams),
    /// Grayscale, sepia, negative, or black & white.
    ColorEffect(ColorEffect),
    /// Fixed-kernel convolution filter.
    Filter(FilterKind),
    /// Canny edge detection with hysteresis thresholds.
    EdgeDetect {
        /// Lower hysteresis threshold, `0..=255`.
        low: f32,
        /// Upper hysteresis threshold, `0..=255`.
        high: f32,
    },
    /// Radial darkening toward the image periphery.
    Vignette {
        /// Darkening strength, nominally `[0, 1]`.
        intensity: f32,
    },
    /// Translucent text in the bottom-right corner.
    Watermark(WatermarkSpec),
    /// Counter-clockwise rotation with canvas expansion.
    Rotate {
        /// Angle in degrees.
        degrees: f32,
    },
    /// Lanczos3 resize, aspect-preserving when one dimension is given.
    Resize(ResizeSpec),
    /// Solid-color border.
    Frame {
        /// Border thickness in pixels.
        width: u32,
        /// Border fill color.
        color: Rgb<u8>,
    },
}

/// Apply a tool to an image, producing a new image.
///
/// Every tool is a pure function: the input is never mutated and no state
/// survives the call.
///
/// # Errors
///
/// Returns [`Error::EmptyImage`] for zero-area input; individual tools add
/// no further failure modes except [`Error::FontLoad`] for watermarking.
pub fn apply(image: &RgbImage, tool: &Tool) -> Result<RgbImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage { width, height });
    }

    match tool {
        Tool::Enhance(params) => enhance::enhance(image, params),
        Tool::ColorEffect(effect) => Ok(effects::color_effect(image, *effect)),
        Tool::Filter(kind) => Ok(filters::filter(image, *kind)),
        Tool::EdgeDetect { low, high } => edges::detect_edges(image, *low, *high),
        Tool::Vignette { intensity } => vignette::vignette(image, *intensity),
        Tool::Watermark(spec) => watermark::add_watermark(image, spec),
        Tool::Rotate { degrees } => geometry::rotate(image, *degrees),
        Tool::Resize(spec) => geometry::resize(image, *spec),
        Tool::Frame { width, color } => frame::add_frame(image, *width, *color),
    }
}

/// Options controlling file processing output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOptions {
    /// Enable verbose logging.
    pub verbose: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

/// Result of processing a single image file.
#[derive(Debug)]
pub struct ProcessResult {
    /// Path of the processed file.
    pub path: PathBuf,
    /// Whether processing succeeded.
    pub success: bool,
    /// Human-readable status message.
    pub message: String,
}

/// Process a single image file: load, apply the tool, save.
///
/// Failures are reported through [`ProcessResult`], never panics.
#[must_use]
pub fn process_file(input: &Path, output: &Path, tool: &Tool) -> ProcessResult {
    let mut result = ProcessResult {
        path: input.to_path_buf(),
        success: false,
        message: String::new(),
    };

    let dyn_img = match image::open(input) {
        Ok(img) => img,
        Err(e) => {
            result.message = format!("Failed to load: {e}");
            return result;
        }
    };
    let rgb_img = dyn_img.to_rgb8();

    let edited = match apply(&rgb_img, tool) {
        Ok(img) => img,
        Err(e) => {
            result.message = format!("Failed to process: {e}");
            return result;
        }
    };

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                result.message = format!("Failed to create output directory: {e}");
                return result;
            }
        }
    }

    match save_image(&edited, output) {
        Ok(()) => {
            result.success = true;
            result.message = format!(
                "{}x{} -> {}x{}",
                rgb_img.width(),
                rgb_img.height(),
                edited.width(),
                edited.height()
            );
        }
        Err(e) => {
            result.message = format!("Failed to save: {e}");
        }
    }

    result
}

/// Process all supported images in a directory with the same tool.
///
/// Uses parallel iteration when the `cli` feature is enabled (via rayon).
/// Returns a [`ProcessResult`] for each image found.
///
/// # Panics
///
/// Panics if any directory entry has no filename (should not happen for
/// regular files).
#[must_use]
pub fn process_directory(input_dir: &Path, output_dir: &Path, tool: &Tool) -> Vec<ProcessResult> {
    let entries: Vec<_> = match std::fs::read_dir(input_dir) {
        Ok(rd) => rd
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
            .filter(|e| is_supported_image(e.path().as_path()))
            .collect(),
        Err(e) => {
            return vec![ProcessResult {
                path: input_dir.to_path_buf(),
                success: false,
                message: format!("Failed to read directory: {e}"),
            }];
        }
    };

    if !output_dir.exists() {
        if let Err(e) = std::fs::create_dir_all(output_dir) {
            return vec![ProcessResult {
                path: output_dir.to_path_buf(),
                success: false,
                message: format!("Failed to create output directory: {e}"),
            }];
        }
    }

    let run = |entry: &std::fs::DirEntry| {
        let input_path = entry.path();
        let filename = input_path.file_name().unwrap();
        let output_path = output_dir.join(filename);
        process_file(&input_path, &output_path, tool)
    };

    #[cfg(feature = "cli")]
    {
        use rayon::prelude::*;
        entries.par_iter().map(run).collect()
    }

    #[cfg(not(feature = "cli"))]
    {
        entries.iter().map(run).collect()
    }
}

/// Check if a file has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(
            ext.to_lowercase().as_str(),
            "jpg" | "jpeg" | "png" | "webp" | "bmp"
        ),
        None => false,
    }
}

/// Save an RGB image with format-specific quality settings.
///
/// # Errors
///
/// Returns an error if the format is unsupported or writing fails.
pub fn save_image(img: &RgbImage, path: &Path) -> Result<()> {
    let format =
        ImageFormat::from_path(path).map_err(|e| Error::UnsupportedFormat(e.to_string()))?;

    let dyn_img = DynamicImage::ImageRgb8(img.clone());

    match format {
        ImageFormat::Jpeg => {
            let file = std::fs::File::create(path)?;
            let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(file, 100);
            encoder.encode_image(&dyn_img)?;
        }
        ImageFormat::Png | ImageFormat::WebP | ImageFormat::Bmp => {
            dyn_img.save(path)?;
        }
        _ => {
            return Err(Error::UnsupportedFormat(format!("{format:?}")));
        }
    }

    Ok(())
}

/// Generate a default output path from an input path.
///
/// Example: `"photo.jpg"` becomes `"photo_edited.jpg"`.
#[must_use]
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let ext = input.extension().unwrap_or_default().to_string_lossy();
    let parent = input.parent().unwrap_or(Path::new("."));
    parent.join(format!("{stem}_edited.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_rejects_empty_images_for_every_tool() {
        let empty = RgbImage::new(0, 0);
        let tools = [
            Tool::Enhance(EnhanceParams::default()),
            Tool::ColorEffect(ColorEffect::Sepia),
            Tool::Filter(FilterKind::Smooth),
            Tool::EdgeDetect {
                low: 100.0,
                high: 200.0,
            },
            Tool::Vignette { intensity: 0.5 },
            Tool::Watermark(WatermarkSpec::default()),
            Tool::Rotate { degrees: 30.0 },
            Tool::Resize(ResizeSpec::default()),
            Tool::Frame {
                width: 5,
                color: Rgb([0, 0, 0]),
            },
        ];
        for tool in tools {
            assert!(
                matches!(apply(&empty, &tool), Err(Error::EmptyImage { .. })),
                "{tool:?} accepted an empty image"
            );
        }
    }

    #[test]
    fn apply_dispatches_to_the_selected_tool() {
        let img = RgbImage::from_pixel(10, 10, Rgb([100, 150, 200]));

        let negative = apply(&img, &Tool::ColorEffect(ColorEffect::Negative)).unwrap();
        assert_eq!(negative.get_pixel(0, 0).0, [155, 105, 55]);

        let framed = apply(
            &img,
            &Tool::Frame {
                width: 2,
                color: Rgb([0, 0, 0]),
            },
        )
        .unwrap();
        assert_eq!(framed.dimensions(), (14, 14));

        let identity = apply(&img, &Tool::Vignette { intensity: 0.0 }).unwrap();
        assert_eq!(identity, img);
    }

    #[test]
    fn default_output_path_appends_edited_suffix() {
        let p = default_output_path(Path::new("/tmp/photo.jpg"));
        assert_eq!(p, PathBuf::from("/tmp/photo_edited.jpg"));

        let p = default_output_path(Path::new("image.png"));
        assert_eq!(p.file_name().unwrap().to_str().unwrap(), "image_edited.png");
    }

    #[test]
    fn is_supported_image_accepts_common_formats() {
        assert!(is_supported_image(Path::new("photo.jpg")));
        assert!(is_supported_image(Path::new("photo.JPEG")));
        assert!(is_supported_image(Path::new("photo.png")));
        assert!(is_supported_image(Path::new("photo.webp")));
        assert!(is_supported_image(Path::new("photo.bmp")));
    }

    #[test]
    fn is_supported_image_rejects_unsupported_formats() {
        assert!(!is_supported_image(Path::new("photo.gif")));
        assert!(!is_supported_image(Path::new("photo.txt")));
        assert!(!is_supported_image(Path::new("photo")));
    }

    #[test]
    fn process_file_reports_missing_input_as_failure() {
        let result = process_file(
            Path::new("/definitely/not/here.png"),
            Path::new("/tmp/out.png"),
            &Tool::Vignette { intensity: 0.5 },
        );
        assert!(!result.success);
        assert!(result.message.contains("Failed to load"));
    }
}
