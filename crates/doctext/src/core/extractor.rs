//! Main extraction entry points.
//!
//! Every entry point classifies the input from its hints and content, then hands it to
//! the dispatcher. Nothing here parses documents itself.
//!
//! # Functions
//!
//! - [`extract_bytes`] - Extract text from an in-memory document
//! - [`extract_file`] - Extract text from a file path
//! - [`batch_extract_bytes`] - Extract many documents concurrently
//! - [`extract_bytes_sync`] / [`extract_file_sync`] - Blocking wrappers

use crate::core::classifier::classify_with_source;
use crate::core::config::ExtractionConfig;
use crate::core::dispatcher::dispatch;
use crate::core::mime::filename_hint;
use crate::types::{ClassificationHint, ExtractionResult};
use crate::{DoctextError, Result};
use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Global Tokio runtime for the synchronous wrappers.
///
/// Built once on first use and shared by every sync call.
///
/// # Panics
///
/// Panics on first use if the process cannot spawn the runtime's worker threads.
static GLOBAL_RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create global Tokio runtime - system may be out of resources")
});

/// Extract text from a document held in memory.
///
/// `declared_media_type` and `supplied_filename` are untrusted hints, typically the
/// `Content-Type` header and the uploaded file name. Either may be absent.
///
/// # Errors
///
/// - `DoctextError::UnsupportedFormat` if no hint or signature identifies the content
/// - `DoctextError::MalformedContent` if the content looks like a format but does not parse
/// - `DoctextError::ExtractorFailure` for any other extraction failure
///
/// # Example
///
/// ```rust
/// use doctext::{ExtractionConfig, extract_bytes};
///
/// # async fn example() -> doctext::Result<()> {
/// let config = ExtractionConfig::default();
/// let result = extract_bytes(b"name,age\nAlice,30", None, None, &config).await?;
/// assert_eq!(result.content, "name,age\nAlice,30");
/// # Ok(())
/// # }
/// ```
pub async fn extract_bytes(
    content: &[u8],
    declared_media_type: Option<&str>,
    supplied_filename: Option<&str>,
    config: &ExtractionConfig,
) -> Result<ExtractionResult> {
    let hint = ClassificationHint {
        declared_media_type,
        supplied_filename,
        raw_bytes: content,
    };
    let (format, source) = classify_with_source(&hint);
    tracing::debug!(format = %format, rule = %source, size_bytes = content.len(), "Classified document");

    dispatch(format, content, config).await
}

/// Extract text from a file.
///
/// The file name is used as the filename hint; `declared_media_type` overrides nothing
/// and is only consulted when the extension says nothing.
///
/// # Errors
///
/// Returns `DoctextError::Validation` if `path` is not a regular file and
/// `DoctextError::Io` if it cannot be read. Otherwise as [`extract_bytes`].
///
/// # Example
///
/// ```rust,no_run
/// use doctext::{ExtractionConfig, extract_file};
///
/// # async fn example() -> doctext::Result<()> {
/// let result = extract_file("invoice.pdf", None, &ExtractionConfig::default()).await?;
/// println!("{}", result.content);
/// # Ok(())
/// # }
/// ```
pub async fn extract_file(
    path: impl AsRef<Path>,
    declared_media_type: Option<&str>,
    config: &ExtractionConfig,
) -> Result<ExtractionResult> {
    let path = path.as_ref();

    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| DoctextError::validation_with_source(format!("Cannot access '{}'", path.display()), e))?;
    if !metadata.is_file() {
        return Err(DoctextError::validation(format!(
            "'{}' is not a regular file",
            path.display()
        )));
    }

    let content = tokio::fs::read(path).await?;
    extract_bytes(&content, declared_media_type, filename_hint(path), config).await
}

/// Extract many documents concurrently.
///
/// Each item is `(content, declared_media_type, supplied_filename)`. At most
/// [`ExtractionConfig::concurrency_limit`] extractions run at once. Results come back
/// in input order, one per item; a failing item does not affect the others.
pub async fn batch_extract_bytes(
    items: Vec<(Vec<u8>, Option<String>, Option<String>)>,
    config: &ExtractionConfig,
) -> Vec<Result<ExtractionResult>> {
    if items.is_empty() {
        return vec![];
    }

    let config = Arc::new(config.clone());
    let semaphore = Arc::new(Semaphore::new(config.concurrency_limit()));
    let mut tasks = JoinSet::new();
    let count = items.len();

    for (index, (content, media_type, filename)) in items.into_iter().enumerate() {
        let config = Arc::clone(&config);
        let semaphore = Arc::clone(&semaphore);

        tasks.spawn(async move {
            let result = match semaphore.acquire().await {
                Ok(_permit) => extract_bytes(&content, media_type.as_deref(), filename.as_deref(), &config).await,
                Err(e) => Err(DoctextError::extractor_failure_with_source("Batch semaphore closed", e)),
            };
            (index, result)
        });
    }

    let mut results: Vec<Option<Result<ExtractionResult>>> = (0..count).map(|_| None).collect();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, result)) => results[index] = Some(result),
            Err(e) => tracing::warn!(error = %e, "Batch extraction task did not complete"),
        }
    }

    results
        .into_iter()
        .map(|slot| slot.unwrap_or_else(|| Err(DoctextError::extractor_failure("Batch extraction task panicked"))))
        .collect()
}

/// Blocking version of [`extract_bytes`].
///
/// Must not be called from inside an async runtime.
pub fn extract_bytes_sync(
    content: &[u8],
    declared_media_type: Option<&str>,
    supplied_filename: Option<&str>,
    config: &ExtractionConfig,
) -> Result<ExtractionResult> {
    GLOBAL_RUNTIME.block_on(extract_bytes(content, declared_media_type, supplied_filename, config))
}

/// Blocking version of [`extract_file`].
pub fn extract_file_sync(
    path: impl AsRef<Path>,
    declared_media_type: Option<&str>,
    config: &ExtractionConfig,
) -> Result<ExtractionResult> {
    GLOBAL_RUNTIME.block_on(extract_file(path, declared_media_type, config))
}
