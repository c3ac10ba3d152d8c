//! Content sniffing.
//!
//! Last step of the classification cascade, consulted only when neither the filename
//! nor the declared media type gave a signal. Rules run in a fixed order and the first
//! hit wins; CSV is the weakest and runs last.

use crate::types::FormatTag;
use memchr::memmem;

/// Window searched for the `%PDF` marker. Some producers emit junk before the header.
pub const PDF_SIGNATURE_WINDOW: usize = 1024;

/// Window searched for a comma when guessing CSV.
pub const CSV_SIGNATURE_WINDOW: usize = 100;

const PDF_MARKER: &[u8] = b"%PDF";
const ZIP_MAGIC: &[u8] = b"PK";
const OOXML_CONTENT_TYPES: &[u8] = b"[Content_Types].xml";
const XLSX_PART_PREFIX: &[u8] = b"xl/";
const JPEG_SOI: &[u8] = &[0xFF, 0xD8];
const PNG_TAG: &[u8] = b"PNG";

/// A single sniffing rule.
#[derive(Debug, Clone, Copy)]
pub struct SniffRule {
    pub name: &'static str,
    pub format: FormatTag,
    matches: fn(&[u8]) -> bool,
}

impl SniffRule {
    pub fn matches(&self, content: &[u8]) -> bool {
        (self.matches)(content)
    }
}

/// The rules, in evaluation order.
pub const SNIFF_RULES: &[SniffRule] = &[
    SniffRule {
        name: "pdf-marker",
        format: FormatTag::Pdf,
        matches: looks_like_pdf,
    },
    SniffRule {
        name: "ooxml-content-types",
        format: FormatTag::Docx,
        matches: looks_like_docx,
    },
    SniffRule {
        name: "zip-xl-part",
        format: FormatTag::Xlsx,
        matches: looks_like_xlsx,
    },
    SniffRule {
        name: "image-signature",
        format: FormatTag::Image,
        matches: looks_like_image,
    },
    SniffRule {
        name: "comma-in-prefix",
        format: FormatTag::Csv,
        matches: looks_like_csv,
    },
];

fn window(content: &[u8], len: usize) -> &[u8] {
    &content[..content.len().min(len)]
}

fn is_zip(content: &[u8]) -> bool {
    content.starts_with(ZIP_MAGIC)
}

/// `%PDF` anywhere in the first [`PDF_SIGNATURE_WINDOW`] bytes.
pub fn looks_like_pdf(content: &[u8]) -> bool {
    memmem::find(window(content, PDF_SIGNATURE_WINDOW), PDF_MARKER).is_some()
}

/// ZIP container holding an OOXML content-types part.
///
/// Entry names live in the local headers and the central directory, so the whole
/// buffer is searched. Any OOXML package (xlsx included) carries this part; docx
/// takes precedence by rule order.
pub fn looks_like_docx(content: &[u8]) -> bool {
    is_zip(content) && memmem::find(content, OOXML_CONTENT_TYPES).is_some()
}

/// ZIP container with an `xl/` entry.
pub fn looks_like_xlsx(content: &[u8]) -> bool {
    is_zip(content) && memmem::find(content, XLSX_PART_PREFIX).is_some()
}

/// JPEG start-of-image, or the `PNG` tag at offset 1 of the PNG signature.
pub fn looks_like_image(content: &[u8]) -> bool {
    content.starts_with(JPEG_SOI) || content.get(1..4) == Some(PNG_TAG)
}

/// A comma in the first [`CSV_SIGNATURE_WINDOW`] bytes.
pub fn looks_like_csv(content: &[u8]) -> bool {
    memchr::memchr(b',', window(content, CSV_SIGNATURE_WINDOW)).is_some()
}

/// First matching rule, if any.
pub fn sniff_rule(content: &[u8]) -> Option<&'static SniffRule> {
    if content.is_empty() {
        return None;
    }
    SNIFF_RULES.iter().find(|rule| rule.matches(content))
}

/// Format by content alone; `Unknown` when nothing matches.
pub fn sniff(content: &[u8]) -> FormatTag {
    sniff_rule(content).map_or(FormatTag::Unknown, |rule| rule.format)
}
