//! PDF extractor.

use crate::core::blocking::run_blocking;
use crate::core::config::ExtractionConfig;
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::{ExtractionResult, FormatTag};
use crate::{DoctextError, Result};
use async_trait::async_trait;
use lopdf::Document;

/// Text extraction from PDF documents using lopdf.
///
/// Page text is taken in page order; pages are separated by a newline. Encrypted
/// documents that can't be opened without a password are treated as malformed.
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for PdfExtractor {
    fn name(&self) -> &str {
        "pdf-extractor"
    }

    fn description(&self) -> &str {
        "Extracts page text from PDF documents using lopdf"
    }
}

/// Extract the text of every page of an in-memory PDF.
pub fn extract_pdf_text(content: &[u8]) -> Result<String> {
    let doc = Document::load_mem(content).map_err(|e| DoctextError::malformed_with_source("Invalid PDF", e))?;

    if doc.is_encrypted() {
        return Err(DoctextError::malformed("PDF is encrypted"));
    }

    let pages = doc.get_pages();
    let mut text = String::new();

    for page_number in pages.keys() {
        let page_text = doc
            .extract_text(&[*page_number])
            .map_err(|e| DoctextError::malformed_with_source(format!("Failed to read text of page {}", page_number), e))?;

        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&page_text);
    }

    Ok(text)
}

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    async fn extract_bytes(&self, content: &[u8], _config: &ExtractionConfig) -> Result<ExtractionResult> {
        let owned = content.to_vec();
        let text = run_blocking("PDF extraction", move || extract_pdf_text(&owned)).await?;
        Ok(ExtractionResult::new(text))
    }

    fn supported_formats(&self) -> &[FormatTag] {
        &[FormatTag::Pdf]
    }
}
