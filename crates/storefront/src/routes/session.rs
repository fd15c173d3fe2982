//! Session identity route handlers.
//!
//! Authentication internals are delegated to an external provider; the
//! storefront only needs an identity in the session for order intake.
//! This demo sign-in stands in for the provider callback.

use axum::{Json, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use voltlane_core::Email;

use crate::error::{AppError, Result};
use crate::models::{SessionUser, session_keys};

/// Demo sign-in body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

/// Establish a demo identity in the session.
#[instrument(skip(session, request), fields(email = %request.email))]
pub async fn login_demo(
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>> {
    let email = Email::parse(&request.email)
        .map_err(|_| AppError::Validation("Please enter a valid email address".to_string()))?;

    let user = SessionUser {
        user_id: Uuid::new_v4(),
        email: email.into_inner(),
    };

    session
        .insert(session_keys::USER, &user)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to store session identity: {e}")))?;

    Ok(Json(json!({ "success": true, "user_id": user.user_id })))
}

/// Show the current session identity, if any.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let user = session
        .get::<SessionUser>(session_keys::USER)
        .await
        .ok()
        .flatten();

    match user {
        Some(user) => Json(json!({
            "success": true,
            "user_id": user.user_id,
            "email": user.email,
        })),
        None => Json(json!({ "success": true, "user_id": null })),
    }
}
