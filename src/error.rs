//! Domain error types for the QA test manager.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::fmt;

/// Message returned for every 500 response; the cause goes in `detalle`.
pub const OPERATION_FAILED: &str = "Operation failed";

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Referenced entity does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Malformed request (bad JSON, missing multipart field, blank value)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Uploaded content was refused (wrong type, too large)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Evidence file could not be written or removed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Shorthand for a missing entity, e.g. `AppError::not_found("Project", 7)`.
    pub fn not_found(entity: &str, id: i32) -> Self {
        AppError::NotFound(format!("{} {}", entity, id))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Validation(_) | AppError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Database(detail) => {
                tracing::error!("Database error: {}", detail);
                ErrorResponse::with_detail(OPERATION_FAILED, detail)
            }
            AppError::Storage(detail) => {
                tracing::error!("Storage error: {}", detail);
                ErrorResponse::with_detail(OPERATION_FAILED, detail)
            }
            AppError::Validation(detail) => {
                tracing::warn!("Validation error: {}", detail);
                ErrorResponse::with_detail(OPERATION_FAILED, detail)
            }
            AppError::NotFound(_) | AppError::InvalidInput(_) => ErrorResponse {
                error: self.to_string(),
                detail: None,
            },
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Error response body: `{"error": ..., "detalle": ...}`.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(rename = "detalle", skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    fn with_detail(error: &str, detail: &str) -> Self {
        Self {
            error: error.to_string(),
            detail: Some(detail.to_string()),
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {}", self.error, detail),
            None => write!(f, "{}", self.error),
        }
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

// Conversion implementations for common error types

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}
