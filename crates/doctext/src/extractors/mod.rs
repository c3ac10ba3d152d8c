//! Built-in document extractors.
//!
//! One extractor per supported format. [`ensure_initialized`] registers them into the
//! global registry exactly once; formats whose feature is disabled have no extractor
//! and dispatching them fails with `UnsupportedFormat`.

use crate::plugins::registry::get_document_extractor_registry;
use crate::{DoctextError, Result};
use once_cell::sync::Lazy;
use std::sync::Arc;

pub mod csv;

#[cfg(feature = "office")]
pub mod docx;

#[cfg(feature = "excel")]
pub mod excel;

#[cfg(feature = "ocr")]
pub mod image;

#[cfg(feature = "pdf")]
pub mod pdf;

pub use csv::CsvExtractor;

#[cfg(feature = "office")]
pub use docx::DocxExtractor;

#[cfg(feature = "excel")]
pub use excel::ExcelExtractor;

#[cfg(feature = "ocr")]
pub use image::ImageExtractor;

#[cfg(feature = "pdf")]
pub use pdf::PdfExtractor;

static EXTRACTORS_INITIALIZED: Lazy<Result<()>> = Lazy::new(register_default_extractors);

/// Register the built-in extractors on first use.
///
/// Also re-registers them if the registry was emptied since.
pub fn ensure_initialized() -> Result<()> {
    EXTRACTORS_INITIALIZED.as_ref().map_err(|e| DoctextError::Plugin {
        message: format!("Failed to register default extractors: {}", e),
        plugin_name: "built-in-extractors".to_string(),
    })?;

    let registry = get_document_extractor_registry();
    let registry_guard = registry
        .read()
        .map_err(|e| DoctextError::LockPoisoned(format!("Document extractor registry lock poisoned: {}", e)))?;

    if registry_guard.list().is_empty() {
        drop(registry_guard);
        register_default_extractors()?;
    }

    Ok(())
}

/// Register every built-in extractor enabled by features into the global registry.
pub fn register_default_extractors() -> Result<()> {
    let registry = get_document_extractor_registry();
    let mut registry = registry
        .write()
        .map_err(|e| DoctextError::LockPoisoned(format!("Document extractor registry lock poisoned: {}", e)))?;

    registry.register(Arc::new(CsvExtractor::new()))?;

    #[cfg(feature = "pdf")]
    registry.register(Arc::new(PdfExtractor::new()))?;

    #[cfg(feature = "office")]
    registry.register(Arc::new(DocxExtractor::new()))?;

    #[cfg(feature = "excel")]
    registry.register(Arc::new(ExcelExtractor::new()))?;

    #[cfg(feature = "ocr")]
    registry.register(Arc::new(ImageExtractor::new()))?;

    Ok(())
}
