//! Text recognition adapter used by the confirmation stage.

use std::future::Future;
use std::io::Cursor;
use std::pin::Pin;

use image::ImageFormat;
use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::process::Command;

use crate::config::OcrConfig;

/// Boxed async result used by [`OcrEngine`] trait methods.
pub type OcrFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Failure to turn image bytes into recognized text.
#[derive(Debug, Error)]
pub enum OcrError {
    /// The bytes are not an image in a supported format.
    #[error("image could not be decoded: {0}")]
    Decode(#[from] image::ImageError),
    /// The recognizer could not be started or reported an error.
    #[error("text recognition failed: {0}")]
    Recognition(String),
}

/// Extracts plain text from one encoded image.
#[cfg_attr(test, mockall::automock)]
pub trait OcrEngine: Send + Sync {
    /// Returns the text recognized in `image`.
    ///
    /// # Errors
    /// Returns [`OcrError::Decode`] when `image` is not a valid image and
    /// [`OcrError::Recognition`] when the recognizer fails.
    fn recognize(&self, image: Vec<u8>) -> OcrFuture<Result<String, OcrError>>;
}

/// [`OcrEngine`] that runs the `tesseract` CLI on a normalized PNG copy.
pub struct TesseractOcr {
    binary: String,
    languages: String,
}

impl TesseractOcr {
    /// Creates an engine using the binary and language set from `config`.
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            languages: config.languages.clone(),
        }
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, image: Vec<u8>) -> OcrFuture<Result<String, OcrError>> {
        let binary = self.binary.clone();
        let languages = self.languages.clone();

        Box::pin(async move {
            let png = tokio::task::spawn_blocking(move || write_png_copy(&image))
                .await
                .map_err(|error| OcrError::Recognition(error.to_string()))??;

            run_tesseract(&binary, &languages, &png).await
        })
    }
}

/// Decodes `bytes` and writes them back as PNG into a temporary file, so the
/// recognizer always sees one well-formed format.
fn write_png_copy(bytes: &[u8]) -> Result<NamedTempFile, OcrError> {
    let decoded = image::load_from_memory(bytes)?;
    let mut encoded = Cursor::new(Vec::new());
    decoded
        .write_to(&mut encoded, ImageFormat::Png)
        .map_err(|error| OcrError::Recognition(format!("failed to re-encode image: {error}")))?;

    let mut file = tempfile::Builder::new()
        .prefix("diskbot-ocr-")
        .suffix(".png")
        .tempfile()
        .map_err(|error| OcrError::Recognition(format!("failed to create temp file: {error}")))?;
    std::io::Write::write_all(&mut file, encoded.get_ref())
        .map_err(|error| OcrError::Recognition(format!("failed to write temp file: {error}")))?;

    Ok(file)
}

async fn run_tesseract(
    binary: &str,
    languages: &str,
    png: &NamedTempFile,
) -> Result<String, OcrError> {
    let output = Command::new(binary)
        .arg(png.path())
        .arg("stdout")
        .args(["-l", languages])
        .output()
        .await
        .map_err(|error| OcrError::Recognition(format!("failed to run `{binary}`: {error}")))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);

        return Err(OcrError::Recognition(format!(
            "`{binary}` exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::*;

    fn png_bytes() -> Vec<u8> {
        let image = RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]));
        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, ImageFormat::Png)
            .expect("failed to encode test image");

        bytes.into_inner()
    }

    fn engine(binary: &str) -> TesseractOcr {
        TesseractOcr {
            binary: binary.to_string(),
            languages: "eng".to_string(),
        }
    }

    #[test]
    fn test_write_png_copy_rejects_non_image_bytes() {
        // Arrange
        let bytes = b"definitely not an image".to_vec();

        // Act
        let result = write_png_copy(&bytes);

        // Assert
        assert!(matches!(result, Err(OcrError::Decode(_))));
    }

    #[test]
    fn test_write_png_copy_writes_decodable_png() {
        // Arrange
        let bytes = png_bytes();

        // Act
        let file = write_png_copy(&bytes).expect("copy should be written");

        // Assert
        let written = std::fs::read(file.path()).expect("failed to read copy");
        assert!(image::load_from_memory_with_format(&written, ImageFormat::Png).is_ok());
    }

    #[tokio::test]
    async fn test_recognize_reports_missing_binary_as_recognition_failure() {
        // Arrange
        let ocr = engine("/no-such-binary-diskbot-test");

        // Act
        let result = ocr.recognize(png_bytes()).await;

        // Assert
        assert!(matches!(result, Err(OcrError::Recognition(_))));
    }

    #[tokio::test]
    async fn test_recognize_returns_recognizer_stdout() {
        // Arrange
        let ocr = engine("echo");

        // Act
        let text = ocr
            .recognize(png_bytes())
            .await
            .expect("echo should succeed");

        // Assert
        assert!(text.contains("stdout -l eng"));
    }

    #[tokio::test]
    async fn test_recognize_reports_non_zero_exit() {
        // Arrange
        let ocr = engine("false");

        // Act
        let result = ocr.recognize(png_bytes()).await;

        // Assert
        assert!(matches!(result, Err(OcrError::Recognition(_))));
    }
}
