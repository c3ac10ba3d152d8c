//! Routing of classified bytes to the extractor bound to their format.
//!
//! The dispatcher is the only place extraction errors are normalized. Callers see
//! three outcomes besides success:
//!
//! - `UnsupportedFormat` when the format is `Unknown` or nothing is registered for it
//! - `MalformedContent` when the extractor recognised the format but could not parse it
//! - `ExtractorFailure` for everything else, with the original error kept as `source`

use crate::core::config::ExtractionConfig;
use crate::plugins::registry::{DocumentExtractorRegistry, get_document_extractor_registry};
use crate::types::{ExtractionResult, FormatTag};
use crate::{DoctextError, Result};

/// Extract `content` as `format` using the global extractor registry.
///
/// Built-in extractors are registered on first use.
///
/// # Errors
///
/// See the module documentation. `Unknown` fails before any extractor is looked up.
pub async fn dispatch(format: FormatTag, content: &[u8], config: &ExtractionConfig) -> Result<ExtractionResult> {
    if !format.is_known() {
        return Err(unknown_format());
    }

    crate::extractors::ensure_initialized()?;

    let registry = get_document_extractor_registry();
    let extractor = {
        let registry = registry
            .read()
            .map_err(|e| DoctextError::LockPoisoned(format!("Document extractor registry lock poisoned: {}", e)))?;
        registry.get(format)?
    };

    run(format, extractor, content, config).await
}

/// Same as [`dispatch`], against an explicit registry.
pub async fn dispatch_with_registry(
    registry: &DocumentExtractorRegistry,
    format: FormatTag,
    content: &[u8],
    config: &ExtractionConfig,
) -> Result<ExtractionResult> {
    if !format.is_known() {
        return Err(unknown_format());
    }

    let extractor = registry.get(format)?;
    run(format, extractor, content, config).await
}

fn unknown_format() -> DoctextError {
    DoctextError::UnsupportedFormat("Could not determine the document format".to_string())
}

async fn run(
    format: FormatTag,
    extractor: std::sync::Arc<dyn crate::plugins::DocumentExtractor>,
    content: &[u8],
    config: &ExtractionConfig,
) -> Result<ExtractionResult> {
    tracing::debug!(
        format = %format,
        extractor = extractor.name(),
        size_bytes = content.len(),
        "Dispatching extraction"
    );

    extractor
        .extract_bytes(content, config)
        .await
        .map_err(|e| normalize_error(format, extractor.name(), e))
}

/// Collapse an extractor error into the dispatcher's error surface.
pub(crate) fn normalize_error(format: FormatTag, extractor_name: &str, error: DoctextError) -> DoctextError {
    match error {
        DoctextError::MalformedContent { .. } | DoctextError::UnsupportedFormat(_) => error,
        DoctextError::ExtractorFailure { .. } => {
            tracing::warn!(format = %format, extractor = extractor_name, error = %error, "Extraction failed");
            error
        }
        other => {
            tracing::warn!(
                format = %format,
                extractor = extractor_name,
                kind = other.kind(),
                error = %other,
                "Extraction failed"
            );
            DoctextError::extractor_failure_with_source(format!("{} extraction failed: {}", format, other), other)
        }
    }
}
