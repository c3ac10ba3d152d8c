//! Mapping of library errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::DoctextError;

use super::types::ErrorResponse;

/// An error ready to be sent to the client as JSON.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                error_type: error_type.into(),
                message: message.into(),
                status_code: status.as_u16(),
            },
        }
    }

    /// 400 for a request the server cannot act on.
    pub fn validation(error: DoctextError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error.kind(), error.to_string())
    }
}

/// HTTP status for a library error.
///
/// Only problems with the request itself are the client's fault. A document that was
/// recognised but could not be parsed is reported as a server-side failure.
pub fn status_for(error: &DoctextError) -> StatusCode {
    match error {
        DoctextError::UnsupportedFormat(_) | DoctextError::Validation { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DoctextError> for ApiError {
    fn from(error: DoctextError) -> Self {
        let status = status_for(&error);
        if status.is_server_error() {
            tracing::error!(kind = error.kind(), error = %error, "Request failed");
        }
        Self::new(status, error.kind(), error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&DoctextError::UnsupportedFormat("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_for(&DoctextError::validation("bad")), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&DoctextError::malformed("bad xref")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&DoctextError::extractor_failure("crash")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_body_carries_kind_and_status() {
        let error = ApiError::from(DoctextError::UnsupportedFormat("video/mp4".into()));
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.body.error_type, "UnsupportedFormat");
        assert_eq!(error.body.status_code, 400);
        assert!(error.body.message.contains("video/mp4"));
    }
}
