//! Format classification.
//!
//! [`classify`] turns a bundle of untrusted hints into a single [`FormatTag`] using a
//! strict cascade, first match wins:
//!
//! 1. the extension of the supplied filename
//! 2. the declared media type, unless it is generic (`application/octet-stream`, ...)
//! 3. content sniffing (see [`crate::core::sniff`])
//!
//! Classification is total and pure. It never fails; the worst outcome is
//! [`FormatTag::Unknown`].
//!
//! # Example
//!
//! ```rust
//! use doctext::{ClassificationHint, FormatTag, classify};
//!
//! let pdf = b"%PDF-1.4 ...";
//! assert_eq!(classify(&ClassificationHint::new(pdf)), FormatTag::Pdf);
//!
//! // A filename overrides what the bytes look like.
//! let hint = ClassificationHint::new(pdf).with_filename(Some("report.csv"));
//! assert_eq!(classify(&hint), FormatTag::Csv);
//! ```

use crate::core::{mime, sniff};
use crate::types::{ClassificationHint, FormatTag};
use serde::Serialize;
use std::fmt;

/// Which step of the cascade produced the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    Filename,
    MediaType,
    Sniff,
    None,
}

impl fmt::Display for ClassificationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClassificationSource::Filename => "filename",
            ClassificationSource::MediaType => "media_type",
            ClassificationSource::Sniff => "sniff",
            ClassificationSource::None => "none",
        };
        f.write_str(name)
    }
}

/// Resolve the format of an upload.
pub fn classify(hint: &ClassificationHint<'_>) -> FormatTag {
    classify_with_source(hint).0
}

/// Like [`classify`], also reporting which cascade step decided.
pub fn classify_with_source(hint: &ClassificationHint<'_>) -> (FormatTag, ClassificationSource) {
    if let Some(filename) = hint.supplied_filename
        && let Some(format) = mime::format_from_filename(filename)
    {
        tracing::debug!(%format, filename, rule = "filename", "Classified upload");
        return (format, ClassificationSource::Filename);
    }

    if let Some(media_type) = hint.declared_media_type
        && let Some(format) = mime::format_from_media_type(media_type)
    {
        tracing::debug!(%format, media_type, rule = "media_type", "Classified upload");
        return (format, ClassificationSource::MediaType);
    }

    match sniff::sniff_rule(hint.raw_bytes) {
        Some(rule) => {
            tracing::debug!(
                format = %rule.format,
                sniff_rule = rule.name,
                rule = "sniff",
                "Classified upload"
            );
            (rule.format, ClassificationSource::Sniff)
        }
        None => {
            tracing::debug!(
                len = hint.raw_bytes.len(),
                filename = hint.supplied_filename,
                media_type = hint.declared_media_type,
                rule = "none",
                "Could not classify upload"
            );
            (FormatTag::Unknown, ClassificationSource::None)
        }
    }
}
