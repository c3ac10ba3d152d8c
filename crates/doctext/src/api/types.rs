//! API request and response types.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::ExtractionConfig;

/// API server size limit configuration.
///
/// Both limits default to 100 MB.
///
/// # Configuration via Environment Variables
///
/// ```bash
/// # In bytes:
/// export DOCTEXT_MAX_REQUEST_BODY_BYTES=104857600     # 100 MB
/// export DOCTEXT_MAX_MULTIPART_FIELD_BYTES=104857600  # 100 MB
///
/// # Legacy, in MB, applies to both limits:
/// export DOCTEXT_MAX_UPLOAD_SIZE_MB=100
/// ```
///
/// # Examples
///
/// ```
/// use doctext::api::ApiSizeLimits;
///
/// let limits = ApiSizeLimits::default();
/// assert_eq!(limits.max_request_body_bytes, 100 * 1024 * 1024);
///
/// let small = ApiSizeLimits::from_mb(5, 2);
/// assert_eq!(small.max_multipart_field_bytes, 2 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiSizeLimits {
    /// Maximum size of the entire request body in bytes.
    pub max_request_body_bytes: usize,

    /// Maximum size of the uploaded file inside a multipart request, in bytes.
    pub max_multipart_field_bytes: usize,
}

impl Default for ApiSizeLimits {
    fn default() -> Self {
        Self::from_mb(100, 100)
    }
}

impl ApiSizeLimits {
    pub fn new(max_request_body_bytes: usize, max_multipart_field_bytes: usize) -> Self {
        Self {
            max_request_body_bytes,
            max_multipart_field_bytes,
        }
    }

    /// Size limits given in megabytes.
    pub fn from_mb(max_request_body_mb: usize, max_multipart_field_mb: usize) -> Self {
        Self {
            max_request_body_bytes: max_request_body_mb * 1024 * 1024,
            max_multipart_field_bytes: max_multipart_field_mb * 1024 * 1024,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Server information response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    pub version: String,
    /// Format tags with a registered extractor, e.g. `["pdf", "docx", "xlsx", "csv", "image"]`.
    pub supported_formats: Vec<String>,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error kind, e.g. `UnsupportedFormat` or `MalformedContent`
    pub error_type: String,
    pub message: String,
    pub status_code: u16,
}

/// API server state.
///
/// Every request is extracted with `default_config`; there are no per-request overrides.
#[derive(Debug, Clone)]
pub struct ApiState {
    pub default_config: Arc<ExtractionConfig>,
    pub limits: ApiSizeLimits,
}
