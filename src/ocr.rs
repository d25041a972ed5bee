//! Text extraction via the `ocrs` engine.
//!
//! Only available with the `ocr` feature. The engine runs two neural network
//! models (detection and recognition) through `rten`; the `.rten` model files
//! are loaded from disk, never embedded. By default they are looked up in the
//! `ocrs` cache directory (`$XDG_CACHE_HOME/ocrs`, typically `~/.cache/ocrs`),
//! which `ocrs-cli` populates on first run.

use std::path::{Path, PathBuf};

use image::RgbImage;
use ocrs::{ImageSource, OcrEngine, OcrEngineParams};
use rten::Model;

use crate::error::{Error, Result};

const DETECTION_MODEL: &str = "text-detection.rten";
const RECOGNITION_MODEL: &str = "text-recognition.rten";

fn default_model_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
        PathBuf::from(xdg).join("ocrs")
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".cache").join("ocrs")
    } else {
        PathBuf::from("ocrs-models")
    }
}

/// Locations of the detection and recognition model files.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Path to the text-detection model (`.rten`).
    pub detection_model: PathBuf,
    /// Path to the text-recognition model (`.rten`).
    pub recognition_model: PathBuf,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self::from_dir(default_model_dir())
    }
}

impl OcrConfig {
    /// Point at a directory expected to contain `text-detection.rten` and
    /// `text-recognition.rten`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            detection_model: dir.join(DETECTION_MODEL),
            recognition_model: dir.join(RECOGNITION_MODEL),
        }
    }

    /// Check that both model files exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Ocr`] naming the missing file.
    pub fn validate(&self) -> Result<()> {
        for path in [&self.detection_model, &self.recognition_model] {
            if !path.exists() {
                return Err(Error::Ocr(format!(
                    "model not found at {}; run `ocrs-cli` once to download models",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

/// A reusable text extractor.
///
/// Model loading is the expensive step; construct once and call
/// [`extract_text`](Self::extract_text) per image. Debug builds of `rten`
/// are drastically slower than release builds.
pub struct TextExtractor {
    engine: OcrEngine,
}

impl TextExtractor {
    /// Load models from the paths in `config` and initialise the engine.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Ocr`] if a model file is missing or corrupt.
    pub fn new(config: &OcrConfig) -> Result<Self> {
        config.validate()?;

        let detection = Model::load_file(&config.detection_model).map_err(|err| {
            Error::Ocr(format!(
                "failed to load detection model {}: {err}",
                config.detection_model.display()
            ))
        })?;
        let recognition = Model::load_file(&config.recognition_model).map_err(|err| {
            Error::Ocr(format!(
                "failed to load recognition model {}: {err}",
                config.recognition_model.display()
            ))
        })?;

        let engine = OcrEngine::new(OcrEngineParams {
            detection_model: Some(detection),
            recognition_model: Some(recognition),
            ..Default::default()
        })
        .map_err(|err| Error::Ocr(format!("failed to initialise OCR engine: {err}")))?;

        Ok(Self { engine })
    }

    /// Extract all recognized text, lines joined with newlines.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Ocr`] if preprocessing or inference fails.
    pub fn extract_text(&self, image: &RgbImage) -> Result<String> {
        let (width, height) = image.dimensions();
        let source = ImageSource::from_bytes(image.as_raw(), (width, height))
            .map_err(|err| Error::Ocr(format!("bad image source ({width}x{height}): {err}")))?;

        let input = self
            .engine
            .prepare_input(source)
            .map_err(|err| Error::Ocr(format!("OCR preprocessing failed: {err}")))?;

        self.engine
            .get_text(&input)
            .map_err(|err| Error::Ocr(format!("OCR recognition failed: {err}")))
    }
}

/// Whether both model files exist in the default cache location.
#[must_use]
pub fn models_available() -> bool {
    let config = OcrConfig::default();
    config.detection_model.exists() && config.recognition_model.exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_dir_appends_model_filenames() {
        let config = OcrConfig::from_dir("/tmp/models");
        assert_eq!(
            config.detection_model,
            PathBuf::from("/tmp/models/text-detection.rten")
        );
        assert_eq!(
            config.recognition_model,
            PathBuf::from("/tmp/models/text-recognition.rten")
        );
    }

    #[test]
    fn validate_fails_for_missing_models() {
        let config = OcrConfig::from_dir("/nonexistent/ocr-models");
        assert!(config.validate().is_err());
    }

    #[test]
    fn extractor_construction_fails_cleanly_without_models() {
        let config = OcrConfig::from_dir("/nonexistent/ocr-models");
        assert!(TextExtractor::new(&config).is_err());
    }
}
