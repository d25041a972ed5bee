//! Single-shot image editing tools.
//!
//! A small toolkit of independent, stateless transformations: vignette,
//! brightness/contrast/saturation/sharpness enhancement, color effects,
//! fixed-kernel filters, Canny edge detection, rotation and resizing, text
//! watermarking, and framing. One tool is applied per call; there is no
//! pipeline state and every function returns a fresh image.
//!
//! # Quick Start
//!
//! ```no_run
//! use image_toolkit::{apply, Tool};
//!
//! let img = image::open("photo.jpg").unwrap().to_rgb8();
//! let edited = apply(&img, &Tool::Vignette { intensity: 0.5 }).unwrap();
//! edited.save("photo_edited.jpg").unwrap();
//! ```
//!
//! # Vignette
//!
//! The vignette kernel darkens each pixel by the cosine of its normalized
//! distance from the image center:
//!
//! ```
//! use image_toolkit::vignette::vignette;
//!
//! let img = image::RgbImage::from_pixel(64, 64, image::Rgb([200, 200, 200]));
//! let out = vignette(&img, 0.0).unwrap();
//! assert_eq!(out, img); // intensity 0 is the identity
//! ```
//!
//! # Text extraction
//!
//! With the `ocr` feature enabled, [`ocr::TextExtractor`] runs the `ocrs`
//! neural models over an image and returns the recognized text.
//!
//! # Background removal
//!
//! With the `background` feature enabled, [`background::BackgroundRemover`]
//! runs a saliency segmentation model and writes the resulting foreground
//! mask into the alpha channel.

#![deny(missing_docs)]

#[cfg(feature = "background")]
pub mod background;
pub mod edges;
pub mod effects;
pub mod enhance;
pub mod error;
pub mod filters;
pub mod frame;
pub mod geometry;
#[cfg(feature = "ocr")]
pub mod ocr;
mod toolkit;
pub mod vignette;
pub mod watermark;

pub use effects::ColorEffect;
pub use enhance::EnhanceParams;
pub use error::{Error, Result};
pub use filters::FilterKind;
pub use geometry::ResizeSpec;
pub use toolkit::{
    apply, default_output_path, is_supported_image, process_directory, process_file, save_image,
    ProcessOptions, ProcessResult, Tool,
};
pub use watermark::WatermarkSpec;
