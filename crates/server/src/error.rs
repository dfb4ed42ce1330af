//! Unified error handling for the server.
//!
//! Services raise typed [`AppError`]s; the transport layer maps them to HTTP
//! status codes and the standard response envelope here. Handlers never
//! format error responses themselves.

use std::collections::HashMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::response::ApiResponse;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing input fields, with field-level detail.
    #[error("Invalid request data")]
    Validation(HashMap<String, String>),

    /// Referenced entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Business rule violation (e.g. ordering an unavailable menu item).
    #[error("Business error: {0}")]
    Business(String),

    /// Unique key conflict (customer phone/email already in use).
    #[error("Duplicate key: {0}")]
    Duplicate(String),

    /// A well-formed but unacceptable argument (unknown status, bad sort field).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(RepositoryError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound("Resource not found".to_owned()),
            RepositoryError::Conflict(msg) => Self::Duplicate(msg),
            other => Self::Database(other),
        }
    }
}

impl AppError {
    /// Machine-readable error code for the response envelope.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Business(_) => "BUSINESS_ERROR",
            Self::Duplicate(_) => "DUPLICATE_KEY",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::Database(_) | Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::Business(_)
            | Self::Duplicate(_)
            | Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            tracing::error!(error = %self, "Request failed");
        }

        let status = self.status();
        let code = self.code();

        // Don't expose internal error details to clients
        let body: ApiResponse<()> = match &self {
            Self::Database(_) | Self::Internal(_) => ApiResponse::error(
                code,
                "An unexpected error occurred. Please try again later.",
            ),
            Self::Validation(fields) => ApiResponse::error_with_details(
                code,
                self.to_string(),
                serde_json::json!(fields),
            ),
            _ => ApiResponse::error(code, self.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = AppError::NotFound("Order not found with id: 123".to_string());
        assert_eq!(err.to_string(), "Not found: Order not found with id: 123");

        let err = AppError::Business("Menu item is not available: Pad Thai".to_string());
        assert_eq!(
            err.to_string(),
            "Business error: Menu item is not available: Pad Thai"
        );
    }

    #[test]
    fn error_status_codes() {
        assert_eq!(
            AppError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Business("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Duplicate("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidArgument("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Validation(HashMap::new()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn internal_errors_do_not_leak_details() {
        let response = AppError::Internal("connection refused at 10.0.0.5".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // Body is the generic envelope; the detail only reaches the logs.
    }

    #[test]
    fn validation_error_carries_field_map() {
        let mut fields = HashMap::new();
        fields.insert("customerName".to_string(), "must not be blank".to_string());
        let err = AppError::Validation(fields);
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
