//! Wishlist route handlers.
//!
//! Same persistence model as the cart: session-backed, best-effort saves.

use axum::{Json, response::IntoResponse};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;

use crate::models::session_keys;
use crate::wishlist::{Wishlist, WishlistEntry};

/// Load the wishlist from the session, defaulting to empty.
async fn load_wishlist(session: &Session) -> Wishlist {
    session
        .get::<Wishlist>(session_keys::WISHLIST)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Write the wishlist back to the session, best-effort.
async fn save_wishlist(session: &Session, wishlist: &Wishlist) {
    if let Err(e) = session.insert(session_keys::WISHLIST, wishlist).await {
        tracing::warn!("Failed to persist wishlist to session: {e}");
    }
}

/// Toggle request body.
#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub product_id: String,
    pub name: String,
    pub unit_price: Decimal,
    #[serde(default)]
    pub image: String,
}

/// Show the wishlist.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let wishlist = load_wishlist(&session).await;
    Json(json!({
        "success": true,
        "entries": wishlist.entries(),
        "count": wishlist.len(),
    }))
}

/// Toggle a product on the wishlist.
#[instrument(skip(session), fields(product_id = %request.product_id))]
pub async fn toggle(session: Session, Json(request): Json<ToggleRequest>) -> impl IntoResponse {
    let mut wishlist = load_wishlist(&session).await;
    let saved = wishlist.toggle(WishlistEntry {
        product_id: request.product_id,
        name: request.name,
        unit_price: request.unit_price,
        image: request.image,
    });

    save_wishlist(&session, &wishlist).await;
    Json(json!({
        "success": true,
        "saved": saved,
        "entries": wishlist.entries(),
        "count": wishlist.len(),
    }))
}
