//! Admin order handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use voltlane_core::OrderStatus;

use crate::db::AdminOrderRepository;
use crate::error::Result;
use crate::state::AppState;

/// Status update body.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// List all orders, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let orders = AdminOrderRepository::new(state.pool()).list_all().await?;
    Ok(Json(json!({ "success": true, "orders": orders })))
}

/// Transition an order's status.
///
/// This is the only place in the system order status changes; forbidden
/// transitions (anything out of a terminal state) are a 400.
#[instrument(skip(state), fields(order_id = %id, status = %request.status))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<serde_json::Value>> {
    AdminOrderRepository::new(state.pool())
        .update_status(id, request.status)
        .await?;

    tracing::info!(order_id = %id, "Order status updated to {}", request.status);
    Ok(Json(json!({ "success": true })))
}
