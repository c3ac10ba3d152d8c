//! Core data types shared by the classifier, the dispatcher and the extractors.

use crate::error::DoctextError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of document formats doctext knows how to extract.
///
/// `Unknown` is the "none matched" outcome of classification. It has no extractor
/// and dispatching it always fails with `UnsupportedFormat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatTag {
    Pdf,
    Docx,
    Xlsx,
    Csv,
    Image,
    Unknown,
}

impl FormatTag {
    /// Every tag that has an extraction capability, in classifier priority order.
    pub const SUPPORTED: [FormatTag; 5] = [
        FormatTag::Pdf,
        FormatTag::Docx,
        FormatTag::Xlsx,
        FormatTag::Image,
        FormatTag::Csv,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatTag::Pdf => "pdf",
            FormatTag::Docx => "docx",
            FormatTag::Xlsx => "xlsx",
            FormatTag::Csv => "csv",
            FormatTag::Image => "image",
            FormatTag::Unknown => "unknown",
        }
    }

    /// Canonical MIME type for the tag. `Unknown` has none; `Image` reports PNG.
    pub fn mime_type(&self) -> Option<&'static str> {
        use crate::core::mime;

        match self {
            FormatTag::Pdf => Some(mime::PDF_MIME_TYPE),
            FormatTag::Docx => Some(mime::DOCX_MIME_TYPE),
            FormatTag::Xlsx => Some(mime::EXCEL_MIME_TYPE),
            FormatTag::Csv => Some(mime::CSV_MIME_TYPE),
            FormatTag::Image => Some(mime::PNG_MIME_TYPE),
            FormatTag::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, FormatTag::Unknown)
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatTag {
    type Err = DoctextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(FormatTag::Pdf),
            "docx" => Ok(FormatTag::Docx),
            "xlsx" => Ok(FormatTag::Xlsx),
            "csv" => Ok(FormatTag::Csv),
            "image" => Ok(FormatTag::Image),
            "unknown" => Ok(FormatTag::Unknown),
            other => Err(DoctextError::validation(format!(
                "Unknown format tag '{}', expected one of pdf, docx, xlsx, csv, image, unknown",
                other
            ))),
        }
    }
}

/// Untrusted signals used to classify an upload.
///
/// Only `raw_bytes` is required. The filename and declared media type come straight
/// from the client and may be absent, generic or simply wrong.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationHint<'a> {
    pub declared_media_type: Option<&'a str>,
    pub supplied_filename: Option<&'a str>,
    pub raw_bytes: &'a [u8],
}

impl<'a> ClassificationHint<'a> {
    /// Hint bundle carrying only the content.
    pub fn new(raw_bytes: &'a [u8]) -> Self {
        Self {
            declared_media_type: None,
            supplied_filename: None,
            raw_bytes,
        }
    }

    pub fn with_media_type(mut self, declared_media_type: Option<&'a str>) -> Self {
        self.declared_media_type = declared_media_type;
        self
    }

    pub fn with_filename(mut self, supplied_filename: Option<&'a str>) -> Self {
        self.supplied_filename = supplied_filename;
        self
    }
}

/// Extracted plain text. No metadata, no page boundaries beyond newline joins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub content: String,
}

impl ExtractionResult {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn into_text(self) -> String {
        self.content
    }
}
