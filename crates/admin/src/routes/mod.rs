//! HTTP route handlers for the admin API.
//!
//! ```text
//! GET  /dashboard            - Revenue and count rollups
//! GET  /orders               - All orders, newest first
//! POST /orders/{id}/status   - Transition an order's status
//! ```

pub mod dashboard;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the admin API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::show))
        .route("/orders", get(orders::index))
        .route("/orders/{id}/status", post(orders::update_status))
}
