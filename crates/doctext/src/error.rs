//! Error types for doctext.
//!
//! Every fallible operation in the crate returns [`DoctextError`]. The three variants
//! that callers of the dispatcher ever observe are:
//!
//! - `UnsupportedFormat` - the classifier found no match, or `Unknown` was dispatched
//! - `MalformedContent` - the bytes matched a format, but the library could not parse them
//! - `ExtractorFailure` - anything else that went wrong inside an extraction capability
//!
//! The remaining variants (`Io`, `Ocr`, `MissingDependency`, ...) are raised inside
//! extractors, the OCR backend and the registries. The dispatcher folds them into
//! `ExtractorFailure`, keeping the original error as `source`.
//!
//! # Example
//!
//! ```rust
//! use doctext::{DoctextError, Result};
//!
//! fn parse(content: &[u8]) -> Result<String> {
//!     if content.is_empty() {
//!         return Err(DoctextError::malformed("document is empty"));
//!     }
//!     Ok(String::from_utf8_lossy(content).into_owned())
//! }
//!
//! assert!(parse(b"").is_err());
//! ```
use thiserror::Error;

/// Result type alias using `DoctextError`.
pub type Result<T> = std::result::Result<T, DoctextError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for all doctext operations.
#[derive(Debug, Error)]
pub enum DoctextError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Malformed content: {message}")]
    MalformedContent {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Extractor failure: {message}")]
    ExtractorFailure {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("OCR error: {message}")]
    Ocr {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("Plugin error in '{plugin_name}': {message}")]
    Plugin { message: String, plugin_name: String },

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl DoctextError {
    error_constructor!(malformed, MalformedContent);
    error_constructor!(extractor_failure, ExtractorFailure);
    error_constructor!(ocr, Ocr);
    error_constructor!(validation, Validation);

    /// Stable, machine-readable name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Io(_) => "Io",
            Self::UnsupportedFormat(_) => "UnsupportedFormat",
            Self::MalformedContent { .. } => "MalformedContent",
            Self::ExtractorFailure { .. } => "ExtractorFailure",
            Self::Ocr { .. } => "Ocr",
            Self::Validation { .. } => "Validation",
            Self::MissingDependency(_) => "MissingDependency",
            Self::Plugin { .. } => "Plugin",
            Self::LockPoisoned(_) => "LockPoisoned",
        }
    }

    /// True for the two variants that describe a failed extraction of a recognised format.
    pub fn is_extraction_failure(&self) -> bool {
        matches!(self, Self::MalformedContent { .. } | Self::ExtractorFailure { .. })
    }
}
