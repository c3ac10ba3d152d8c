//! OCR backend plugin trait.

use crate::Result;
use crate::core::config::ExtractionConfig;
use crate::plugins::Plugin;
use async_trait::async_trait;
use image::DynamicImage;

/// Recognises text in an already decoded raster image.
///
/// The image extractor decodes the upload first, so backends never see bytes that
/// failed to decode. Recognised text is returned verbatim.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use doctext::plugins::{OcrBackend, Plugin};
/// use doctext::{ExtractionConfig, Result};
/// use image::DynamicImage;
///
/// struct DimensionsOcr;
///
/// impl Plugin for DimensionsOcr {
///     fn name(&self) -> &str { "dimensions" }
/// }
///
/// #[async_trait]
/// impl OcrBackend for DimensionsOcr {
///     async fn process_image(&self, image: DynamicImage, _config: &ExtractionConfig) -> Result<String> {
///         Ok(format!("{}x{}", image.width(), image.height()))
///     }
/// }
/// ```
#[async_trait]
pub trait OcrBackend: Plugin {
    /// Run recognition over `image`.
    ///
    /// Engine settings come from `config.ocr`; backends that need the image on disk
    /// stage it under `config.staging_dir`.
    ///
    /// # Errors
    ///
    /// - `DoctextError::Ocr` - the engine ran but failed
    /// - `DoctextError::MissingDependency` - the engine is not installed
    async fn process_image(&self, image: DynamicImage, config: &ExtractionConfig) -> Result<String>;

    /// Whether `language` (as written in `ocr.language`) is usable.
    fn supports_language(&self, _language: &str) -> bool {
        true
    }
}
