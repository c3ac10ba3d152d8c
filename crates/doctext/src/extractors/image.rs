//! Raster image extractor (OCR).

use crate::core::blocking::run_blocking;
use crate::core::config::ExtractionConfig;
use crate::plugins::{DocumentExtractor, OcrBackend, Plugin};
use crate::types::{ExtractionResult, FormatTag};
use crate::{DoctextError, Result};
use async_trait::async_trait;
use image::DynamicImage;
use std::sync::Arc;

/// Recognises the text of PNG and JPEG images.
///
/// The image is decoded first; bytes the decoder rejects are `MalformedContent`.
/// The decoded image then goes to an OCR backend: the one bound with
/// [`with_backend`](ImageExtractor::with_backend), or else the backend named by
/// `config.ocr.backend` in the global OCR registry.
pub struct ImageExtractor {
    backend: Option<Arc<dyn OcrBackend>>,
}

impl ImageExtractor {
    pub fn new() -> Self {
        Self { backend: None }
    }

    /// Use `backend` regardless of configuration.
    pub fn with_backend(backend: Arc<dyn OcrBackend>) -> Self {
        Self { backend: Some(backend) }
    }

    fn resolve_backend(&self, config: &ExtractionConfig) -> Result<Arc<dyn OcrBackend>> {
        if let Some(backend) = &self.backend {
            return Ok(Arc::clone(backend));
        }

        let registry = crate::plugins::registry::get_ocr_backend_registry();
        let registry = registry
            .read()
            .map_err(|e| DoctextError::LockPoisoned(format!("OCR backend registry lock poisoned: {}", e)))?;
        registry.get(&config.ocr.backend)
    }
}

impl Default for ImageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for ImageExtractor {
    fn name(&self) -> &str {
        "image-extractor"
    }

    fn description(&self) -> &str {
        "Decodes PNG/JPEG images and recognises their text with an OCR backend"
    }
}

/// Decode an in-memory PNG or JPEG.
pub fn decode_image(content: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(content).map_err(|e| DoctextError::malformed_with_source("Undecodable image", e))
}

#[async_trait]
impl DocumentExtractor for ImageExtractor {
    async fn extract_bytes(&self, content: &[u8], config: &ExtractionConfig) -> Result<ExtractionResult> {
        let owned = content.to_vec();
        let image = run_blocking("Image decoding", move || decode_image(&owned)).await?;

        let backend = self.resolve_backend(config)?;
        if !backend.supports_language(&config.ocr.language) {
            return Err(DoctextError::ocr(format!(
                "OCR backend '{}' does not support language '{}'",
                backend.name(),
                config.ocr.language
            )));
        }

        tracing::debug!(
            backend = backend.name(),
            width = image.width(),
            height = image.height(),
            "Running OCR"
        );
        let text = backend.process_image(image, config).await?;
        Ok(ExtractionResult::new(text))
    }

    fn supported_formats(&self) -> &[FormatTag] {
        &[FormatTag::Image]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    struct SizeOcr;

    impl Plugin for SizeOcr {
        fn name(&self) -> &str {
            "size-ocr"
        }
    }

    #[async_trait]
    impl OcrBackend for SizeOcr {
        async fn process_image(&self, image: DynamicImage, config: &ExtractionConfig) -> Result<String> {
            Ok(format!("{}x{} {}", image.width(), image.height(), config.ocr.language))
        }

        fn supports_language(&self, language: &str) -> bool {
            language != "klingon"
        }
    }

    fn encode(format: ImageFormat) -> Vec<u8> {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 3, image::Rgb([255, 255, 255])));
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, format).unwrap();
        bytes.into_inner()
    }

    #[tokio::test]
    async fn test_png_goes_to_backend_decoded() {
        let extractor = ImageExtractor::with_backend(Arc::new(SizeOcr));
        let result = extractor
            .extract_bytes(&encode(ImageFormat::Png), &ExtractionConfig::default())
            .await
            .unwrap();
        assert_eq!(result.content, "4x3 eng");
    }

    #[tokio::test]
    async fn test_jpeg_goes_to_backend_decoded() {
        let extractor = ImageExtractor::with_backend(Arc::new(SizeOcr));
        let result = extractor
            .extract_bytes(&encode(ImageFormat::Jpeg), &ExtractionConfig::default())
            .await
            .unwrap();
        assert_eq!(result.content, "4x3 eng");
    }

    #[tokio::test]
    async fn test_undecodable_image_is_malformed() {
        let extractor = ImageExtractor::with_backend(Arc::new(SizeOcr));
        let err = extractor
            .extract_bytes(b"\x89PNG\r\n\x1a\nnot really", &ExtractionConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DoctextError::MalformedContent { .. }));
    }

    #[tokio::test]
    async fn test_unsupported_language_is_ocr_error() {
        let extractor = ImageExtractor::with_backend(Arc::new(SizeOcr));
        let mut config = ExtractionConfig::default();
        config.ocr.language = "klingon".to_string();
        let err = extractor
            .extract_bytes(&encode(ImageFormat::Png), &config)
            .await
            .unwrap_err();
        assert!(matches!(err, DoctextError::Ocr { .. }));
    }

    #[tokio::test]
    async fn test_unregistered_backend_is_plugin_error() {
        let extractor = ImageExtractor::new();
        let mut config = ExtractionConfig::default();
        config.ocr.backend = "does-not-exist".to_string();
        let err = extractor
            .extract_bytes(&encode(ImageFormat::Png), &config)
            .await
            .unwrap_err();
        assert!(matches!(err, DoctextError::Plugin { .. }));
    }

    #[test]
    fn test_plugin_interface() {
        let extractor = ImageExtractor::default();
        assert_eq!(extractor.name(), "image-extractor");
        assert_eq!(extractor.supported_formats(), &[FormatTag::Image]);
    }
}
