//! Admin error types and HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use voltlane_core::OrderStatus;

/// Errors surfaced by admin handlers.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found")]
    NotFound,

    #[error("Cannot transition order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Stored data is invalid: {0}")]
    DataCorruption(String),
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Database(e) => {
                sentry::capture_error(e);
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            Self::NotFound => (StatusCode::NOT_FOUND, "Order not found".to_string()),
            Self::InvalidTransition { .. } => (StatusCode::BAD_REQUEST, self.to_string()),
            Self::DataCorruption(msg) => {
                tracing::error!("Data corruption: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Stored data is invalid".to_string(),
                )
            }
        };

        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}

/// Convenience result alias for admin handlers.
pub type Result<T> = std::result::Result<T, AdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_is_bad_request() {
        let err = AdminError::InvalidTransition {
            from: OrderStatus::Completed,
            to: OrderStatus::Pending,
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_status() {
        let response = AdminError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
