//! Order history route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::models::{SessionUser, session_keys};
use crate::state::AppState;

/// List the signed-in user's orders, newest first.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<serde_json::Value>> {
    let Some(user) = session
        .get::<SessionUser>(session_keys::USER)
        .await
        .ok()
        .flatten()
    else {
        return Err(AppError::Unauthorized(
            "Sign in to view your orders".to_string(),
        ));
    };

    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.user_id)
        .await?;

    Ok(Json(json!({ "success": true, "orders": orders })))
}

/// Show one order with its item lines.
///
/// Only the order's owner may view it.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(order_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let Some(user) = session
        .get::<SessionUser>(session_keys::USER)
        .await
        .ok()
        .flatten()
    else {
        return Err(AppError::Unauthorized(
            "Sign in to view your orders".to_string(),
        ));
    };

    let repo = OrderRepository::new(state.pool());
    let order = repo
        .get(order_id)
        .await?
        .filter(|o| o.user_id == user.user_id)
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
    let items = repo.items(order_id).await?;

    Ok(Json(json!({ "success": true, "order": order, "items": items })))
}
