//! Machine-readable error codes carried by every [`ErrorResponse`](super::ErrorResponse).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable identifiers for error responses.
///
/// Each code has a string form (`as_str`, shown to clients), an integer form
/// (`code`, used in structured logs) and a default message.
///
/// Integer ranges:
/// - 1000-1999: client errors
/// - 4000-4999: I/O errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BadRequest,
    ValidationError,
    InvalidUuid,
    JsonExtraction,
    InvalidQuery,
    NotFound,
    Conflict,
    InternalError,
    IoError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUuid => "INVALID_UUID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::InternalError => "INTERNAL_ERROR",
            Self::IoError => "IO_ERROR",
        }
    }

    /// ```rust
    /// use axum_helpers::errors::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::ValidationError.code(), 1001);
    /// assert_eq!(ErrorCode::Conflict.code(), 1008);
    /// ```
    pub fn code(&self) -> i32 {
        match self {
            Self::BadRequest => 1000,
            Self::ValidationError => 1001,
            Self::InvalidUuid => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Conflict => 1008,
            Self::InvalidQuery => 1012,
            Self::IoError => 4001,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::BadRequest => "Bad request",
            Self::ValidationError => "Request validation failed",
            Self::InvalidUuid => "Invalid UUID format",
            Self::JsonExtraction => "Failed to parse request body",
            Self::InvalidQuery => "Invalid query string",
            Self::NotFound => "Resource not found",
            Self::Conflict => "Resource already exists",
            Self::InternalError => "Unexpected error, check server logs",
            Self::IoError => "I/O error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
