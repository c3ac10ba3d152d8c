//! Delimited text (CSV) extractor.

use crate::Result;
use crate::core::config::ExtractionConfig;
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::{ExtractionResult, FormatTag};
use async_trait::async_trait;

/// Passes CSV content through as text.
///
/// The bytes are decoded as UTF-8 and invalid sequences are dropped. Nothing is parsed,
/// so this extractor never fails.
pub struct CsvExtractor;

impl CsvExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for CsvExtractor {
    fn name(&self) -> &str {
        "csv-extractor"
    }

    fn description(&self) -> &str {
        "Decodes delimited text as UTF-8, dropping invalid sequences"
    }
}

/// Decode `content` as UTF-8, silently dropping invalid byte sequences.
pub fn decode_utf8_dropping_invalid(content: &[u8]) -> String {
    if let Some(valid) = fast_validate(content) {
        return valid.to_owned();
    }

    let mut text = String::with_capacity(content.len());
    for chunk in content.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

#[cfg(feature = "simd-utf8")]
fn fast_validate(content: &[u8]) -> Option<&str> {
    simdutf8::basic::from_utf8(content).ok()
}

#[cfg(not(feature = "simd-utf8"))]
fn fast_validate(content: &[u8]) -> Option<&str> {
    std::str::from_utf8(content).ok()
}

#[async_trait]
impl DocumentExtractor for CsvExtractor {
    async fn extract_bytes(&self, content: &[u8], _config: &ExtractionConfig) -> Result<ExtractionResult> {
        Ok(ExtractionResult::new(decode_utf8_dropping_invalid(content)))
    }

    fn supported_formats(&self) -> &[FormatTag] {
        &[FormatTag::Csv]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_utf8_is_identical() {
        let input = "name,age\nAlice,30\nZoë,27\n";
        assert_eq!(decode_utf8_dropping_invalid(input.as_bytes()), input);
    }

    #[test]
    fn test_invalid_sequences_are_dropped() {
        assert_eq!(decode_utf8_dropping_invalid(b"a,\xFFb\n"), "a,b\n");
        assert_eq!(decode_utf8_dropping_invalid(b"\xC3(x,y"), "(x,y");
        assert_eq!(decode_utf8_dropping_invalid(b"ok,\xE2\x82"), "ok,");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decode_utf8_dropping_invalid(b""), "");
    }

    #[tokio::test]
    async fn test_extractor_never_fails() {
        let extractor = CsvExtractor::new();
        let result = extractor
            .extract_bytes(b"\xFF\xFE,\x00", &ExtractionConfig::default())
            .await
            .unwrap();
        assert_eq!(result.content, ",\0");
        assert_eq!(extractor.name(), "csv-extractor");
        assert_eq!(extractor.supported_formats(), &[FormatTag::Csv]);
    }
}
