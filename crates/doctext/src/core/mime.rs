//! MIME type and filename extension tables.
//!
//! Both tables are closed: anything not listed here produces no signal and leaves
//! classification to the next step of the cascade.

use crate::types::FormatTag;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;

pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const DOCX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const EXCEL_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const CSV_MIME_TYPE: &str = "text/csv";
pub const PNG_MIME_TYPE: &str = "image/png";
pub const JPEG_MIME_TYPE: &str = "image/jpeg";
pub const OCTET_STREAM_MIME_TYPE: &str = "application/octet-stream";

/// Extension (lowercase, without the dot) to format.
static EXT_TO_FORMAT: Lazy<HashMap<&'static str, FormatTag>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert("pdf", FormatTag::Pdf);
    m.insert("csv", FormatTag::Csv);
    m.insert("xlsx", FormatTag::Xlsx);
    m.insert("docx", FormatTag::Docx);
    m.insert("jpg", FormatTag::Image);
    m.insert("jpeg", FormatTag::Image);
    m.insert("png", FormatTag::Image);

    m
});

/// Media type essence (lowercase) to format, aliases included.
static MIME_TO_FORMAT: Lazy<HashMap<&'static str, FormatTag>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert(PDF_MIME_TYPE, FormatTag::Pdf);
    m.insert("application/x-pdf", FormatTag::Pdf);

    m.insert(DOCX_MIME_TYPE, FormatTag::Docx);
    m.insert(EXCEL_MIME_TYPE, FormatTag::Xlsx);

    m.insert(CSV_MIME_TYPE, FormatTag::Csv);
    m.insert("application/csv", FormatTag::Csv);

    m.insert(PNG_MIME_TYPE, FormatTag::Image);
    m.insert(JPEG_MIME_TYPE, FormatTag::Image);
    m.insert("image/jpg", FormatTag::Image);
    m.insert("image/pjpeg", FormatTag::Image);

    m
});

/// Declared types that say nothing about the content.
const GENERIC_MEDIA_TYPES: &[&str] = &[
    OCTET_STREAM_MIME_TYPE,
    "binary/octet-stream",
    "application/unknown",
    "*/*",
];

/// Extension of the final path component, lowercased.
///
/// Both `/` and `\` count as separators, since client-supplied names frequently carry
/// Windows paths. A leading dot (`.pdf`) or a trailing dot (`report.`) yields `None`.
pub fn filename_extension(filename: &str) -> Option<String> {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Format implied by a filename's extension, if the extension is one we map.
pub fn format_from_filename(filename: &str) -> Option<FormatTag> {
    let ext = filename_extension(filename)?;
    EXT_TO_FORMAT.get(ext.as_str()).copied()
}

/// Strip parameters and whitespace from a media type and lowercase it.
///
/// `"Text/CSV; charset=utf-8"` becomes `"text/csv"`.
pub fn normalize_media_type(media_type: &str) -> String {
    media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// True when a declared media type carries no format signal.
pub fn is_generic_media_type(media_type: &str) -> bool {
    let essence = normalize_media_type(media_type);
    essence.is_empty() || essence.starts_with("multipart/") || GENERIC_MEDIA_TYPES.contains(&essence.as_str())
}

/// Format implied by a declared media type. Generic and unmapped types give `None`.
pub fn format_from_media_type(media_type: &str) -> Option<FormatTag> {
    if is_generic_media_type(media_type) {
        return None;
    }
    let essence = normalize_media_type(media_type);
    MIME_TO_FORMAT.get(essence.as_str()).copied()
}

/// File name of a path as a UTF-8 hint, when it has one.
pub fn filename_hint(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_filename_known_extensions() {
        let cases = [
            ("report.pdf", FormatTag::Pdf),
            ("data.csv", FormatTag::Csv),
            ("book.xlsx", FormatTag::Xlsx),
            ("letter.docx", FormatTag::Docx),
            ("scan.jpg", FormatTag::Image),
            ("scan.jpeg", FormatTag::Image),
            ("scan.png", FormatTag::Image),
        ];
        for (name, expected) in cases {
            assert_eq!(format_from_filename(name), Some(expected), "failed for {}", name);
        }
    }

    #[test]
    fn test_format_from_filename_case_insensitive() {
        assert_eq!(format_from_filename("REPORT.PDF"), Some(FormatTag::Pdf));
        assert_eq!(format_from_filename("Book.XlsX"), Some(FormatTag::Xlsx));
    }

    #[test]
    fn test_format_from_filename_uses_final_component() {
        assert_eq!(format_from_filename("C:\\scans\\page.PNG"), Some(FormatTag::Image));
        assert_eq!(format_from_filename("/tmp/v1.2/data.csv"), Some(FormatTag::Csv));
        assert_eq!(format_from_filename("archive.pdf/readme"), None);
    }

    #[test]
    fn test_format_from_filename_no_signal() {
        assert_eq!(format_from_filename("README"), None);
        assert_eq!(format_from_filename(".pdf"), None);
        assert_eq!(format_from_filename("report."), None);
        assert_eq!(format_from_filename("notes.txt"), None);
        assert_eq!(format_from_filename("legacy.xls"), None);
        assert_eq!(format_from_filename(""), None);
    }

    #[test]
    fn test_normalize_media_type() {
        assert_eq!(normalize_media_type("Text/CSV; charset=utf-8"), "text/csv");
        assert_eq!(normalize_media_type("  application/pdf  "), "application/pdf");
        assert_eq!(normalize_media_type(""), "");
    }

    #[test]
    fn test_format_from_media_type_aliases() {
        assert_eq!(format_from_media_type("application/pdf"), Some(FormatTag::Pdf));
        assert_eq!(format_from_media_type("application/x-pdf"), Some(FormatTag::Pdf));
        assert_eq!(format_from_media_type(DOCX_MIME_TYPE), Some(FormatTag::Docx));
        assert_eq!(format_from_media_type(EXCEL_MIME_TYPE), Some(FormatTag::Xlsx));
        assert_eq!(format_from_media_type("application/csv"), Some(FormatTag::Csv));
        assert_eq!(format_from_media_type("image/jpg"), Some(FormatTag::Image));
        assert_eq!(format_from_media_type("image/pjpeg"), Some(FormatTag::Image));
        assert_eq!(format_from_media_type("IMAGE/PNG"), Some(FormatTag::Image));
    }

    #[test]
    fn test_generic_media_types_give_no_signal() {
        for generic in [
            "",
            "   ",
            "application/octet-stream",
            "Application/Octet-Stream; name=x",
            "binary/octet-stream",
            "application/unknown",
            "*/*",
            "multipart/form-data; boundary=abc",
        ] {
            assert!(is_generic_media_type(generic), "{:?} should be generic", generic);
            assert_eq!(format_from_media_type(generic), None);
        }
    }

    #[test]
    fn test_unmapped_media_type() {
        assert_eq!(format_from_media_type("text/plain"), None);
        assert_eq!(format_from_media_type("image/gif"), None);
        assert!(!is_generic_media_type("text/plain"));
    }

    #[test]
    fn test_filename_hint() {
        assert_eq!(filename_hint(Path::new("/data/in/report.pdf")), Some("report.pdf"));
        assert_eq!(filename_hint(Path::new("/")), None);
    }
}
