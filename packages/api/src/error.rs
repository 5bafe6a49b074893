// ABOUTME: API error type and its JSON response shape
// ABOUTME: Maps domain errors to status codes, machine codes, and sanitized messages

use archive_core::ValidationError;
use archive_security::SecurityError;
use archive_storage::StorageError;
use archive_theses::ThesisError;
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::pdf_store::PdfStoreError;

/// Error type returned by every handler
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Structured error body
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    success: bool,
    error: String,
    code: &'static str,
    request_id: String,
}

impl ApiError {
    fn to_status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            ApiError::UnsupportedMediaType(_) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "UNSUPPORTED_MEDIA_TYPE")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Message safe to show to clients
    fn to_user_message(&self) -> String {
        match self {
            ApiError::Validation(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::PayloadTooLarge(msg)
            | ApiError::UnsupportedMediaType(msg) => msg.clone(),
            ApiError::Internal(_) => "Internal server error".to_string(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let (status_code, error_code) = self.to_status_and_code();

        match &self {
            ApiError::Internal(err) => {
                error!(
                    request_id = %request_id,
                    error = %err,
                    "Internal server error occurred"
                );
            }
            _ => {
                info!(
                    request_id = %request_id,
                    error_code = %error_code,
                    error = %self,
                    "API error response"
                );
            }
        }

        let body = ErrorResponse {
            success: false,
            error: self.to_user_message(),
            code: error_code,
            request_id,
        };

        (status_code, Json(body)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => ApiError::not_found("Resource not found"),
            StorageError::Duplicate(msg) => ApiError::Conflict(msg),
            StorageError::Validation(msg) => ApiError::Validation(msg),
            other => ApiError::internal(other),
        }
    }
}

impl From<ThesisError> for ApiError {
    fn from(err: ThesisError) -> Self {
        match err {
            ThesisError::NotFound => ApiError::not_found("Thesis not found"),
            ThesisError::Forbidden(msg) => ApiError::Forbidden(msg),
            err @ ThesisError::InvalidTransition { .. } => ApiError::Conflict(err.to_string()),
            err @ ThesisError::NothingToUpdate => ApiError::Validation(err.to_string()),
            ThesisError::InvalidInput(msg) => ApiError::Validation(msg),
            ThesisError::Validation(err) => err.into(),
            ThesisError::Storage(err) => err.into(),
        }
    }
}

impl From<SecurityError> for ApiError {
    fn from(err: SecurityError) -> Self {
        match err {
            SecurityError::Storage(StorageError::NotFound) => ApiError::not_found("User not found"),
            SecurityError::Storage(err) => err.into(),
            SecurityError::Validation(err) => err.into(),
            err @ SecurityError::DuplicateUsername(_) => ApiError::Conflict(err.to_string()),
            err @ SecurityError::IncorrectPassword => ApiError::Validation(err.to_string()),
            SecurityError::InvalidToken(_) => ApiError::unauthorized("Invalid or expired token"),
            other => ApiError::internal(other),
        }
    }
}

impl From<PdfStoreError> for ApiError {
    fn from(err: PdfStoreError) -> Self {
        ApiError::internal(err)
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        match err.status() {
            StatusCode::PAYLOAD_TOO_LARGE => {
                ApiError::PayloadTooLarge("File size exceeds the 50MB limit".to_string())
            }
            _ => ApiError::Validation(format!("Invalid multipart body: {}", err.body_text())),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection.status() {
            StatusCode::UNSUPPORTED_MEDIA_TYPE => {
                ApiError::UnsupportedMediaType("Expected a JSON request body".to_string())
            }
            StatusCode::PAYLOAD_TOO_LARGE => {
                ApiError::PayloadTooLarge("Request body too large".to_string())
            }
            _ => ApiError::Validation(rejection.body_text()),
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archive_core::ThesisStatus;

    #[test]
    fn test_validation_error_status() {
        let error = ApiError::validation("Title is required");
        let (status, code) = error.to_status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_thesis_errors_map_to_statuses() {
        let cases = [
            (ThesisError::NotFound, StatusCode::NOT_FOUND),
            (
                ThesisError::Forbidden("You can only edit your own submissions".to_string()),
                StatusCode::FORBIDDEN,
            ),
            (
                ThesisError::InvalidTransition {
                    from: ThesisStatus::Approved,
                    action: "reject",
                },
                StatusCode::CONFLICT,
            ),
            (ThesisError::NothingToUpdate, StatusCode::BAD_REQUEST),
            (ThesisError::InvalidInput("bad".to_string()), StatusCode::BAD_REQUEST),
        ];

        for (err, expected) in cases {
            let (status, _) = ApiError::from(err).to_status_and_code();
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn test_duplicate_username_is_conflict() {
        let error: ApiError = SecurityError::DuplicateUsername("jdoe".to_string()).into();
        let (status, code) = error.to_status_and_code();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(code, "CONFLICT");
        assert!(error.to_user_message().contains("jdoe"));
    }

    #[test]
    fn test_user_message_sanitization() {
        let internal_error = ApiError::internal(anyhow::anyhow!(
            "Database connection failed with password xyz"
        ));
        let message = internal_error.to_user_message();
        assert_eq!(message, "Internal server error");
        assert!(!message.contains("password"));
        assert!(!message.contains("xyz"));
    }
}
