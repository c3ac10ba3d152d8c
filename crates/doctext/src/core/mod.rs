//! Core extraction orchestration.
//!
//! - **Classification** (`classifier`, `mime`, `sniff`): hints and bytes to a [`FormatTag`](crate::FormatTag)
//! - **Dispatch** (`dispatcher`): a tag and bytes to the registered extractor, with error normalization
//! - **Entry points** (`extractor`): classify-then-dispatch for bytes, files and batches
//! - **Configuration** (`config`): `ExtractionConfig` and file discovery
//! - **Resources** (`blocking`, `staging`): blocking-pool offload and scoped temp files
//!
//! # Example
//!
//! ```rust,no_run
//! use doctext::core::config::ExtractionConfig;
//! use doctext::core::extractor::extract_file;
//!
//! # async fn example() -> doctext::Result<()> {
//! let config = ExtractionConfig::discover()?.unwrap_or_default();
//! let result = extract_file("scan.png", None, &config).await?;
//! println!("{}", result.content);
//! # Ok(())
//! # }
//! ```

pub mod blocking;
pub mod classifier;
pub mod config;
pub mod dispatcher;
pub mod extractor;
pub mod mime;
pub mod sniff;
pub mod staging;

pub use classifier::{ClassificationSource, classify, classify_with_source};
pub use config::{ExtractionConfig, OcrConfig, SpreadsheetConfig};
pub use dispatcher::{dispatch, dispatch_with_registry};
pub use extractor::{batch_extract_bytes, extract_bytes, extract_bytes_sync, extract_file, extract_file_sync};
