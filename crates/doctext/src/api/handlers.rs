//! API request handlers.

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Multipart, Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::core::classifier::classify_with_source;
use crate::core::dispatcher::dispatch;
use crate::types::ClassificationHint;
use crate::{DoctextError, FormatTag};

use super::{
    error::ApiError,
    types::{ApiState, HealthResponse, InfoResponse},
};

/// Response header carrying the tag the upload was classified as.
pub const DETECTED_FORMAT_HEADER: &str = "x-detected-format";

/// Request header carrying the client's file name for raw-body uploads.
pub const FILENAME_HEADER: &str = "x-filename";

/// One uploaded document together with the hints that came with it.
#[derive(Debug)]
struct Upload {
    content: Bytes,
    media_type: Option<String>,
    filename: Option<String>,
}

/// Parse endpoint handler.
///
/// POST /parse
///
/// The document can be sent three ways:
///
/// - raw body, with its `Content-Type`
/// - raw body, with the file name in `X-Filename` or `Content-Disposition: ...; filename="..."`
/// - `multipart/form-data`, using the first part that carries a file name (or is named
///   `file`/`files`); the part's own content type is the declared media type
///
/// On success the body is the extracted text as `text/plain; charset=utf-8` and the
/// `X-Detected-Format` header names the format.
pub async fn parse_handler(State(state): State<ApiState>, request: Request) -> Result<Response, ApiError> {
    let upload = if is_multipart(request.headers()) {
        read_multipart(&state, request).await?
    } else {
        read_raw_body(&state, request).await?
    };

    let hint = ClassificationHint {
        declared_media_type: upload.media_type.as_deref(),
        supplied_filename: upload.filename.as_deref(),
        raw_bytes: &upload.content,
    };
    let (format, source) = classify_with_source(&hint);
    tracing::info!(
        format = %format,
        rule = %source,
        size_bytes = upload.content.len(),
        "Parsing upload"
    );

    let result = dispatch(format, &upload.content, &state.default_config).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8")),
            (
                header::HeaderName::from_static(DETECTED_FORMAT_HEADER),
                HeaderValue::from_static(format.as_str()),
            ),
        ],
        result.content,
    )
        .into_response())
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim_start().to_ascii_lowercase().starts_with("multipart/form-data"))
}

fn header_str<'a>(headers: &'a HeaderMap, name: impl header::AsHeaderName) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

async fn read_raw_body(state: &ApiState, request: Request) -> Result<Upload, ApiError> {
    let headers = request.headers();
    let media_type = header_str(headers, header::CONTENT_TYPE).map(str::to_string);
    let filename = header_str(headers, FILENAME_HEADER)
        .map(str::to_string)
        .or_else(|| header_str(headers, header::CONTENT_DISPOSITION).and_then(content_disposition_filename));

    let content = Bytes::from_request(request, state)
        .await
        .map_err(|rejection| ApiError::new(rejection.status(), "Validation", rejection.body_text()))?;

    Ok(Upload {
        content,
        media_type,
        filename,
    })
}

async fn read_multipart(state: &ApiState, request: Request) -> Result<Upload, ApiError> {
    let mut multipart = Multipart::from_request(request, state)
        .await
        .map_err(|rejection| ApiError::new(rejection.status(), "Validation", rejection.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new(e.status(), "Validation", e.body_text()))?
    {
        let is_file_field = field.file_name().is_some() || matches!(field.name(), Some("file" | "files"));
        if !is_file_field {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let media_type = field.content_type().map(str::to_string);
        let content = field
            .bytes()
            .await
            .map_err(|e| ApiError::new(e.status(), "Validation", e.body_text()))?;

        if content.len() > state.limits.max_multipart_field_bytes {
            return Err(ApiError::new(
                StatusCode::PAYLOAD_TOO_LARGE,
                "Validation",
                format!(
                    "Uploaded file exceeds the limit of {} bytes",
                    state.limits.max_multipart_field_bytes
                ),
            ));
        }

        return Ok(Upload {
            content,
            media_type,
            filename,
        });
    }

    Err(ApiError::validation(DoctextError::validation(
        "No file provided in multipart request",
    )))
}

/// File name from a `Content-Disposition` value such as `attachment; filename="a.pdf"`.
fn content_disposition_filename(value: &str) -> Option<String> {
    value.split(';').skip(1).find_map(|param| {
        let (key, raw) = param.trim().split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("filename") {
            return None;
        }
        let name = raw.trim().trim_matches('"');
        (!name.is_empty()).then(|| name.to_string())
    })
}

/// Health check endpoint handler.
///
/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Server info endpoint handler.
///
/// GET /info
pub async fn info_handler() -> Result<Json<InfoResponse>, ApiError> {
    crate::extractors::ensure_initialized()?;

    let registry = crate::plugins::registry::get_document_extractor_registry();
    let formats: Vec<FormatTag> = {
        let registry = registry
            .read()
            .map_err(|e| DoctextError::LockPoisoned(format!("Document extractor registry lock poisoned: {}", e)))?;
        registry.formats()
    };

    Ok(Json(InfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        supported_formats: formats.iter().map(|format| format.as_str().to_string()).collect(),
    }))
}
