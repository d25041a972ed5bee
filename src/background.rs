//! Background removal via a neural segmentation model.
//!
//! Only available with the `background` feature. A single ISNet-style
//! saliency model runs through `rten`; the `.rten` model file is loaded
//! from disk, never embedded. By default it is looked up in the toolkit
//! cache directory (`$XDG_CACHE_HOME/image-toolkit`, typically
//! `~/.cache/image-toolkit`). Pretrained ONNX weights convert to that
//! format with `rten-convert`.

use std::path::{Path, PathBuf};

use image::{imageops, GrayImage, Luma, RgbImage, Rgba, RgbaImage};
use rten::Model;
use rten_tensor::prelude::*;
use rten_tensor::NdTensor;

use crate::error::{Error, Result};

const SEGMENTATION_MODEL: &str = "segmentation.rten";

/// Model input edge length; the image is squashed to this square for
/// inference and the mask is stretched back afterwards.
const MODEL_INPUT_SIZE: u32 = 320;

fn default_model_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
        PathBuf::from(xdg).join("image-toolkit")
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".cache").join("image-toolkit")
    } else {
        PathBuf::from("segmentation-models")
    }
}

/// Location of the segmentation model file.
#[derive(Debug, Clone)]
pub struct BackgroundConfig {
    /// Path to the saliency segmentation model (`.rten`).
    pub model: PathBuf,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self::from_dir(default_model_dir())
    }
}

impl BackgroundConfig {
    /// Point at a directory expected to contain `segmentation.rten`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            model: dir.as_ref().join(SEGMENTATION_MODEL),
        }
    }

    /// Check that the model file exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Segmentation`] naming the missing file.
    pub fn validate(&self) -> Result<()> {
        if !self.model.exists() {
            return Err(Error::Segmentation(format!(
                "model not found at {}; convert ISNet weights with `rten-convert` \
                 and place the result there",
                self.model.display()
            )));
        }
        Ok(())
    }
}

/// A reusable background remover.
///
/// Model loading is the expensive step; construct once and call
/// [`remove`](Self::remove) per image. Debug builds of `rten` are
/// drastically slower than release builds.
pub struct BackgroundRemover {
    model: Model,
}

impl BackgroundRemover {
    /// Load the model from the path in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Segmentation`] if the model file is missing or
    /// corrupt.
    pub fn new(config: &BackgroundConfig) -> Result<Self> {
        config.validate()?;

        let model = Model::load_file(&config.model).map_err(|err| {
            Error::Segmentation(format!(
                "failed to load segmentation model {}: {err}",
                config.model.display()
            ))
        })?;

        Ok(Self { model })
    }

    /// Compute a foreground probability mask at the image's resolution,
    /// 255 meaning certainly foreground.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyImage`] for a zero-area image and
    /// [`Error::Segmentation`] if inference fails.
    pub fn segment(&self, image: &RgbImage) -> Result<GrayImage> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage { width, height });
        }

        let input = prepare_input(image);
        let output = self
            .model
            .run_one(input.view().into(), None)
            .map_err(|err| Error::Segmentation(format!("inference failed: {err}")))?;
        let output: NdTensor<f32, 4> = output
            .try_into()
            .map_err(|_| Error::Segmentation("model output was not a rank-4 float tensor".into()))?;

        let mask = mask_from_logits(&output)?;
        Ok(imageops::resize(
            &mask,
            width,
            height,
            imageops::FilterType::Triangle,
        ))
    }

    /// Remove the background, returning the image with the mask written
    /// into the alpha channel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyImage`] for a zero-area image and
    /// [`Error::Segmentation`] if inference fails.
    pub fn remove(&self, image: &RgbImage) -> Result<RgbaImage> {
        let mask = self.segment(image)?;
        Ok(apply_mask(image, &mask))
    }
}

/// Squash to the model's square input and normalize channels to roughly
/// [-0.5, 0.5], the range the ISNet family trains on.
fn prepare_input(image: &RgbImage) -> NdTensor<f32, 4> {
    let size = MODEL_INPUT_SIZE;
    let resized = imageops::resize(image, size, size, imageops::FilterType::Triangle);

    let side = size as usize;
    let mut tensor = NdTensor::zeros([1, 3, side, side]);
    for (x, y, px) in resized.enumerate_pixels() {
        for ch in 0..3 {
            tensor[[0, ch, y as usize, x as usize]] = f32::from(px[ch]) / 255.0 - 0.5;
        }
    }
    tensor
}

/// Min-max rescale the model's saliency map into an 8-bit mask.
fn mask_from_logits(output: &NdTensor<f32, 4>) -> Result<GrayImage> {
    let [_, _, rows, cols] = output.shape();
    if rows == 0 || cols == 0 {
        return Err(Error::Segmentation(format!(
            "model produced an empty {rows}x{cols} saliency map"
        )));
    }

    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for y in 0..rows {
        for x in 0..cols {
            let v = output[[0, 0, y, x]];
            min = min.min(v);
            max = max.max(v);
        }
    }
    let range = max - min;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mask = GrayImage::from_fn(cols as u32, rows as u32, |x, y| {
        let v = output[[0, 0, y as usize, x as usize]];
        let scaled = if range <= f32::EPSILON {
            0.0
        } else {
            (v - min) / range
        };
        Luma([(scaled * 255.0).round().clamp(0.0, 255.0) as u8])
    });
    Ok(mask)
}

/// Write `mask` into the alpha channel of `image`, leaving color values
/// untouched. The mask is stretched to the image's dimensions if needed.
#[must_use]
pub fn apply_mask(image: &RgbImage, mask: &GrayImage) -> RgbaImage {
    let (width, height) = image.dimensions();
    let resized;
    let mask = if mask.dimensions() == (width, height) {
        mask
    } else {
        resized = imageops::resize(mask, width, height, imageops::FilterType::Triangle);
        &resized
    };

    RgbaImage::from_fn(width, height, |x, y| {
        let px = image.get_pixel(x, y);
        let alpha = mask.get_pixel(x, y)[0];
        Rgba([px[0], px[1], px[2], alpha])
    })
}

/// Whether the model file exists in the default cache location.
#[must_use]
pub fn model_available() -> bool {
    BackgroundConfig::default().model.exists()
}
