//! Newsletter subscription route handlers.
//!
//! Subscriptions are upserted by email: re-subscribing an unsubscribed
//! address reactivates it rather than creating a duplicate row.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use voltlane_core::Email;

use crate::db::newsletter::SubscriberRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Subscribe request body.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
    pub full_name: Option<String>,
}

/// Unsubscribe request body.
#[derive(Debug, Deserialize)]
pub struct UnsubscribeRequest {
    pub email: String,
}

/// Subscribe to the newsletter.
#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn subscribe(
    State(state): State<AppState>,
    Json(request): Json<SubscribeRequest>,
) -> Result<Json<serde_json::Value>> {
    // Validation happens before any database call
    let email = Email::parse(&request.email)
        .map_err(|_| AppError::Validation("Please enter a valid email address".to_string()))?;

    let subscriber = SubscriberRepository::new(state.pool())
        .subscribe(&email, request.full_name.as_deref())
        .await?;

    tracing::info!(email = %email, "Newsletter subscription active");
    Ok(Json(json!({ "success": true, "subscriber": subscriber })))
}

/// Unsubscribe from the newsletter.
#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn unsubscribe(
    State(state): State<AppState>,
    Json(request): Json<UnsubscribeRequest>,
) -> Result<Json<serde_json::Value>> {
    let email = Email::parse(&request.email)
        .map_err(|_| AppError::Validation("Please enter a valid email address".to_string()))?;

    SubscriberRepository::new(state.pool())
        .unsubscribe(&email)
        .await?;

    Ok(Json(json!({ "success": true })))
}
