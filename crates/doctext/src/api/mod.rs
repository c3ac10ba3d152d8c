//! HTTP API for document text extraction.
//!
//! An axum server that accepts an upload, classifies it and returns its text.
//!
//! # Endpoints
//!
//! - `POST /parse` - Extract the text of one uploaded document
//! - `GET /health` - Health check
//! - `GET /info` - Version and supported formats
//!
//! Errors are JSON [`ErrorResponse`] bodies: 400 for unsupported formats and bad
//! requests, 500 for documents that could not be extracted.
//!
//! # Examples
//!
//! ```no_run
//! use doctext::{ExtractionConfig, api::serve_with_config};
//!
//! #[tokio::main]
//! async fn main() -> doctext::Result<()> {
//!     let config = ExtractionConfig::from_toml_file("config/doctext.toml")?;
//!     serve_with_config("0.0.0.0", 8000, config).await
//! }
//! ```
//!
//! # cURL Examples
//!
//! ```bash
//! # Raw body, typed by Content-Type
//! curl --data-binary @invoice.pdf -H 'Content-Type: application/pdf' http://localhost:8000/parse
//!
//! # Raw body, typed by file name
//! curl --data-binary @scan.png -H 'X-Filename: scan.png' http://localhost:8000/parse
//!
//! # Multipart upload
//! curl -F "file=@report.docx" http://localhost:8000/parse
//! ```

mod error;
mod handlers;
mod server;
mod types;

pub use error::{ApiError, status_for};
pub use handlers::{DETECTED_FORMAT_HEADER, FILENAME_HEADER};
pub use server::{
    create_router, create_router_with_limits, parse_size_limits_from_env, serve, serve_with_config,
    serve_with_config_and_limits,
};
pub use types::{ApiSizeLimits, ApiState, ErrorResponse, HealthResponse, InfoResponse};
