//! Document extractor plugin trait.

use crate::Result;
use crate::core::config::ExtractionConfig;
use crate::plugins::Plugin;
use crate::types::{ExtractionResult, FormatTag};
use async_trait::async_trait;
use std::path::Path;

/// Turns the bytes of one or more formats into plain text.
///
/// Extractors are registered per [`FormatTag`]; when several claim the same tag the
/// one with the highest [`priority`](DocumentExtractor::priority) is used.
///
/// Implementations report parse problems as `DoctextError::MalformedContent`. Any
/// other error is folded into `ExtractorFailure` by the dispatcher.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use doctext::plugins::{DocumentExtractor, Plugin};
/// use doctext::{ExtractionConfig, ExtractionResult, FormatTag, Result};
///
/// struct ShoutingCsv;
///
/// impl Plugin for ShoutingCsv {
///     fn name(&self) -> &str { "shouting-csv" }
/// }
///
/// #[async_trait]
/// impl DocumentExtractor for ShoutingCsv {
///     async fn extract_bytes(&self, content: &[u8], _config: &ExtractionConfig) -> Result<ExtractionResult> {
///         Ok(ExtractionResult::new(String::from_utf8_lossy(content).to_uppercase()))
///     }
///
///     fn supported_formats(&self) -> &[FormatTag] {
///         &[FormatTag::Csv]
///     }
///
///     fn priority(&self) -> i32 { 100 }
/// }
/// ```
#[async_trait]
pub trait DocumentExtractor: Plugin {
    /// Extract text from an in-memory document.
    async fn extract_bytes(&self, content: &[u8], config: &ExtractionConfig) -> Result<ExtractionResult>;

    /// Extract text from a file. Reads the file and delegates to `extract_bytes`.
    async fn extract_file(&self, path: &Path, config: &ExtractionConfig) -> Result<ExtractionResult> {
        let bytes = tokio::fs::read(path).await?;
        self.extract_bytes(&bytes, config).await
    }

    /// Formats this extractor handles. Must not include `Unknown`.
    fn supported_formats(&self) -> &[FormatTag];

    /// Selection priority among extractors for the same format; higher wins.
    fn priority(&self) -> i32 {
        50
    }
}
