//! DOCX extractor using docx-lite.

use crate::core::blocking::run_blocking;
use crate::core::config::ExtractionConfig;
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::{ExtractionResult, FormatTag};
use crate::{DoctextError, Result};
use async_trait::async_trait;
use std::io::Cursor;

/// Flattened body text of Word (.docx) documents.
///
/// Paragraphs come out one per line; tables and styles are not reconstructed.
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for DocxExtractor {
    fn name(&self) -> &str {
        "docx-extractor"
    }

    fn description(&self) -> &str {
        "Streaming DOCX text extraction using docx-lite"
    }
}

pub fn extract_docx_text(content: &[u8]) -> Result<String> {
    let doc = docx_lite::parse_document(Cursor::new(content))
        .map_err(|e| DoctextError::malformed(format!("DOCX parsing failed: {}", e)))?;
    Ok(doc.extract_text())
}

#[async_trait]
impl DocumentExtractor for DocxExtractor {
    async fn extract_bytes(&self, content: &[u8], _config: &ExtractionConfig) -> Result<ExtractionResult> {
        let owned = content.to_vec();
        let text = run_blocking("DOCX extraction", move || extract_docx_text(&owned)).await?;
        Ok(ExtractionResult::new(text))
    }

    fn supported_formats(&self) -> &[FormatTag] {
        &[FormatTag::Docx]
    }
}
