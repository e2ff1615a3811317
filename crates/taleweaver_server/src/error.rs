//! JSON error responses.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use taleweaver_error::{ProviderError, ValidationError, ValidationErrorKind};

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// An error a handler turns into a `{ "error": ... }` response.
///
/// Every failure leaving the router goes through this type, so clients
/// always receive a JSON body whatever the status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    /// Response status
    pub status: StatusCode,
    /// Message placed in the `error` field
    pub message: String,
}

impl AppError {
    /// Create an error response.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 with the given message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 500 with the given message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        match e.kind {
            ValidationErrorKind::MissingField(_) => AppError::bad_request("Missing required fields"),
            kind => AppError::bad_request(kind.to_string()),
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(e: ProviderError) -> Self {
        AppError::internal(e.kind.to_string())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(_: MultipartRejection) -> Self {
        AppError::bad_request(ValidationErrorKind::InvalidContentType.to_string())
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        let status = e.status();
        let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
            "Request body too large".to_string()
        } else {
            format!("Invalid multipart body: {}", e.body_text())
        };
        AppError::new(status, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taleweaver_error::ProviderErrorKind;

    #[test]
    fn test_missing_field_uses_generic_message() {
        let err = AppError::from(ValidationError::new(ValidationErrorKind::MissingField(
            "prompt".to_string(),
        )));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Missing required fields");
    }

    #[test]
    fn test_provider_errors_are_internal() {
        let err = AppError::from(ProviderError::new(ProviderErrorKind::HttpStatus {
            status_code: 400,
            message: "bad prompt".to_string(),
        }));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message.contains("bad prompt"));
    }
}
