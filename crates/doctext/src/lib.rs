//! doctext - plain text out of uploaded documents
//!
//! doctext takes an upload whose type nobody vouches for (PDF, DOCX, XLSX, CSV, PNG or
//! JPEG), works out what it actually is from the filename, the declared media type and
//! the bytes themselves, and extracts its text.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use doctext::{ExtractionConfig, extract_file_sync};
//!
//! # fn main() -> doctext::Result<()> {
//! let config = ExtractionConfig::default();
//! let result = extract_file_sync("quarterly.xlsx", None, &config)?;
//! println!("{}", result.content);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core** (`core`): classification cascade, dispatch, entry points, configuration
//! - **Plugins** (`plugins`): extractor and OCR backend traits plus their registries
//! - **Extractors** (`extractors`): one built-in extractor per format
//! - **OCR** (`ocr`): the tesseract backend
//! - **API** (`api`, feature `api`): HTTP server
//!
//! # Features
//!
//! - `pdf`, `office`, `excel`, `ocr`: format support (all on by default)
//! - `simd-utf8`: SIMD validation on the CSV fast path
//! - `api`: the axum HTTP server

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod extractors;
pub mod plugins;
pub mod types;

#[cfg(feature = "ocr")]
pub mod ocr;

#[cfg(feature = "api")]
pub mod api;

pub use error::{DoctextError, Result};
pub use types::{ClassificationHint, ExtractionResult, FormatTag};

pub use core::classifier::{ClassificationSource, classify, classify_with_source};
pub use core::config::{ExtractionConfig, OcrConfig, SpreadsheetConfig};
pub use core::dispatcher::{dispatch, dispatch_with_registry};
pub use core::extractor::{batch_extract_bytes, extract_bytes, extract_bytes_sync, extract_file, extract_file_sync};

pub use core::mime::{
    CSV_MIME_TYPE, DOCX_MIME_TYPE, EXCEL_MIME_TYPE, JPEG_MIME_TYPE, PDF_MIME_TYPE, PNG_MIME_TYPE,
};

pub use plugins::registry::get_document_extractor_registry;

#[cfg(feature = "ocr")]
pub use plugins::registry::get_ocr_backend_registry;
