//! Pluggable capabilities.
//!
//! - [`Plugin`] - name, version and lifecycle shared by all plugins
//! - [`DocumentExtractor`] - turns the bytes of a format into text
//! - [`OcrBackend`] - recognises text in a decoded image (feature `ocr`)
//!
//! Plugins are stored as `Arc<dyn Trait>` in the registries of [`registry`]. The
//! dispatcher asks the extractor registry for the highest-priority extractor of a
//! classified format, so registering an extractor with a priority above 50 replaces a
//! built-in one:
//!
//! ```rust
//! use async_trait::async_trait;
//! use doctext::plugins::registry::DocumentExtractorRegistry;
//! use doctext::plugins::{DocumentExtractor, Plugin};
//! use doctext::{ExtractionConfig, ExtractionResult, FormatTag, Result};
//! use std::sync::Arc;
//!
//! struct PassthroughCsv;
//!
//! impl Plugin for PassthroughCsv {
//!     fn name(&self) -> &str { "passthrough-csv" }
//! }
//!
//! #[async_trait]
//! impl DocumentExtractor for PassthroughCsv {
//!     async fn extract_bytes(&self, content: &[u8], _: &ExtractionConfig) -> Result<ExtractionResult> {
//!         Ok(ExtractionResult::new(String::from_utf8_lossy(content).into_owned()))
//!     }
//!     fn supported_formats(&self) -> &[FormatTag] { &[FormatTag::Csv] }
//!     fn priority(&self) -> i32 { 100 }
//! }
//!
//! let mut registry = DocumentExtractorRegistry::new();
//! registry.register(Arc::new(PassthroughCsv))?;
//! assert_eq!(registry.get(FormatTag::Csv)?.name(), "passthrough-csv");
//! # Ok::<(), doctext::DoctextError>(())
//! ```

pub mod extractor;
#[cfg(feature = "ocr")]
pub mod ocr;
pub mod registry;
pub mod traits;

pub use extractor::DocumentExtractor;
#[cfg(feature = "ocr")]
pub use ocr::OcrBackend;
pub use registry::DocumentExtractorRegistry;
#[cfg(feature = "ocr")]
pub use registry::OcrBackendRegistry;
pub use traits::Plugin;
