//! Error Types for NOTEKEEPER API
//!
//! `ApiError` is the single client-facing error shape. Every failure kind
//! coming out of validation or storage is translated to an `ErrorCode`
//! here, and `ErrorCode::status_code` is the only status table.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use notekeeper_core::{ConfigError, StorageError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================================================
    // Client Errors (400)
    // ========================================================================
    /// Path id is not a positive integer
    InvalidId,

    /// Title is empty or longer than 20 characters
    InvalidTitle,

    /// Description is empty
    InvalidDescription,

    /// Request body could not be decoded
    InvalidJson,

    // ========================================================================
    // Not Found Errors (404)
    // ========================================================================
    /// Requested note does not exist
    NoteNotFound,

    // ========================================================================
    // Server Errors (500, 503)
    // ========================================================================
    /// Internal server error
    InternalError,

    /// Backing store is unreachable
    ServiceUnavailable,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidId
            | ErrorCode::InvalidTitle
            | ErrorCode::InvalidDescription
            | ErrorCode::InvalidJson => StatusCode::BAD_REQUEST,

            ErrorCode::NoteNotFound => StatusCode::NOT_FOUND,

            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get a default message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::InvalidId => "Invalid ID",
            ErrorCode::InvalidTitle => "title must be 1..20 characters",
            ErrorCode::InvalidDescription => "the description cannot be empty",
            ErrorCode::InvalidJson => "Bad JSON data",
            ErrorCode::NoteNotFound => "Note not found",
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::ServiceUnavailable => "Service temporarily unavailable",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error response: `{"code": "...", "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, utoipa::ToSchema)]
#[error("{code}: {message}")]
pub struct ApiError {
    /// Error code categorizing the error
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a new API error with the given code, using the default message.
    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    pub fn invalid_id() -> Self {
        Self::from_code(ErrorCode::InvalidId)
    }

    pub fn invalid_json() -> Self {
        Self::from_code(ErrorCode::InvalidJson)
    }

    pub fn note_not_found() -> Self {
        Self::from_code(ErrorCode::NoteNotFound)
    }

    /// Generic 500. The detail is logged, never returned to the client.
    pub fn internal_error(detail: impl fmt::Display) -> Self {
        tracing::error!(error = %detail, "Internal error");
        Self::from_code(ErrorCode::InternalError)
    }

    pub fn service_unavailable() -> Self {
        Self::from_code(ErrorCode::ServiceUnavailable)
    }
}

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self)).into_response()
    }
}

// ============================================================================
// CONVERSIONS FROM DOMAIN ERRORS
// ============================================================================

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let code = match err {
            ValidationError::InvalidId { .. } => ErrorCode::InvalidId,
            ValidationError::InvalidTitle { .. } => ErrorCode::InvalidTitle,
            ValidationError::InvalidDescription => ErrorCode::InvalidDescription,
        };
        Self::from_code(code)
    }
}

/// Storage failures other than a missing row are logged in full and
/// reported to the client as a bare 500.
impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { .. } => Self::note_not_found(),
            other => {
                tracing::error!(error = %other, "Storage error");
                Self::from_code(ErrorCode::InternalError)
            }
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        Self::internal_error(format!("configuration: {}", err))
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
