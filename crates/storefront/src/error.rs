//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`, and every failure renders as a JSON body of the
//! shape `{ "success": false, "error": "..." }` - nothing is allowed to
//! throw past the handler layer.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::payment::PaymentError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Payment bridge operation failed.
    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    /// Request input failed validation (caught before any network call).
    #[error("Validation error: {0}")]
    Validation(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry; validation noise stays local
        if matches!(
            self,
            Self::Repository(RepositoryError::Database(_)) | Self::Internal(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Repository(err) => match err {
                RepositoryError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Conflict(_) => StatusCode::CONFLICT,
                RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Payment(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            Self::Repository(err) => err.user_message(),
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Payment(err) => err.to_string(),
            Self::Validation(msg) | Self::Unauthorized(msg) | Self::NotFound(msg) => msg.clone(),
        };

        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
