//! Error types for the image-toolkit crate.

/// Errors that can occur while applying a tool or doing file I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The image has zero rows or zero columns; per-pixel kernels cannot
    /// normalize distances over an empty grid.
    #[error("empty image ({width}x{height}): every tool requires at least one pixel")]
    EmptyImage {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image format is not supported.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// An error occurred during image processing (load, save, encode).
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// The embedded watermark font could not be parsed.
    #[error("failed to load embedded font: {0}")]
    FontLoad(&'static str),

    /// OCR model loading or inference failed.
    #[cfg(feature = "ocr")]
    #[error("OCR error: {0}")]
    Ocr(String),

    /// Segmentation model loading or inference failed.
    #[cfg(feature = "background")]
    #[error("background removal error: {0}")]
    Segmentation(String),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let io_err = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io_err.to_string().contains("gone"));

        let unsupported = Error::UnsupportedFormat("tiff".to_string());
        assert!(unsupported.to_string().contains("tiff"));

        let empty = Error::EmptyImage {
            width: 0,
            height: 24,
        };
        assert!(empty.to_string().contains("0x24"));
    }
}
