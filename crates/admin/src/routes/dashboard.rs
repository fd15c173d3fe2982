//! Dashboard rollup handler.

use axum::{Json, extract::State};
use serde_json::json;
use tracing::instrument;

use crate::db::AdminOrderRepository;
use crate::error::Result;
use crate::state::AppState;
use crate::stats;

/// Show revenue, order, and subscriber rollups.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let repo = AdminOrderRepository::new(state.pool());

    let orders = repo.list_all().await?;
    let active_subscribers = repo.count_active_subscribers().await?;

    let revenue = stats::revenue(&orders);
    let counts = stats::order_counts(&orders);

    Ok(Json(json!({
        "success": true,
        "revenue": revenue,
        "orders": counts,
        "active_subscribers": active_subscribers,
    })))
}
