//! Cart route handlers.
//!
//! The cart lives in the session and is written back after every
//! mutation. Saves are best-effort: a failed session write is logged and
//! swallowed, never surfaced to the shopper - the in-memory response is
//! still correct for this request.

use axum::{Json, extract::State, response::IntoResponse};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::{Cart, CartLine, CartTotals, LineKey};
use crate::models::session_keys;
use crate::state::AppState;

/// Load the cart from the session, defaulting to empty.
pub(crate) async fn load_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Write the cart back to the session, best-effort.
pub(crate) async fn save_cart(session: &Session, cart: &Cart) {
    if let Err(e) = session.insert(session_keys::CART, cart).await {
        tracing::warn!("Failed to persist cart to session: {e}");
    }
}

/// Render the standard cart response body.
fn cart_response(cart: &Cart) -> Json<serde_json::Value> {
    let CartTotals {
        subtotal,
        shipping,
        tax,
        total,
    } = cart.totals();

    Json(json!({
        "success": true,
        "lines": cart.lines(),
        "item_count": cart.item_count(),
        "subtotal": subtotal,
        "shipping": shipping,
        "tax": tax,
        "total": total,
    }))
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: String,
    pub name: String,
    pub unit_price: Decimal,
    #[serde(default)]
    pub image: String,
    pub quantity: Option<u32>,
    pub color: Option<String>,
    pub material: Option<String>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub product_id: String,
    pub color: Option<String>,
    pub material: Option<String>,
    pub quantity: u32,
}

/// Remove line request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: String,
    pub color: Option<String>,
    pub material: Option<String>,
}

/// Show the cart with its pricing breakdown.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    cart_response(&cart)
}

/// Add a line to the cart, merging on `(product_id, color, material)`.
#[instrument(skip(_state, session), fields(product_id = %request.product_id))]
pub async fn add(
    State(_state): State<AppState>,
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> impl IntoResponse {
    let mut cart = load_cart(&session).await;
    cart.add(CartLine {
        product_id: request.product_id,
        name: request.name,
        unit_price: request.unit_price,
        image: request.image,
        quantity: request.quantity.unwrap_or(1),
        color: request.color,
        material: request.material,
    });

    save_cart(&session, &cart).await;
    cart_response(&cart)
}

/// Set the quantity of a line; 0 removes it.
#[instrument(skip(_state, session), fields(product_id = %request.product_id))]
pub async fn update(
    State(_state): State<AppState>,
    session: Session,
    Json(request): Json<UpdateCartRequest>,
) -> impl IntoResponse {
    let mut cart = load_cart(&session).await;
    cart.set_quantity(
        &LineKey {
            product_id: request.product_id,
            color: request.color,
            material: request.material,
        },
        request.quantity,
    );

    save_cart(&session, &cart).await;
    cart_response(&cart)
}

/// Remove a line from the cart.
#[instrument(skip(_state, session), fields(product_id = %request.product_id))]
pub async fn remove(
    State(_state): State<AppState>,
    session: Session,
    Json(request): Json<RemoveFromCartRequest>,
) -> impl IntoResponse {
    let mut cart = load_cart(&session).await;
    cart.remove(&LineKey {
        product_id: request.product_id,
        color: request.color,
        material: request.material,
    });

    save_cart(&session, &cart).await;
    cart_response(&cart)
}

/// Remove all lines from the cart.
#[instrument(skip(_state, session))]
pub async fn clear(State(_state): State<AppState>, session: Session) -> impl IntoResponse {
    let mut cart = load_cart(&session).await;
    cart.clear();

    save_cart(&session, &cart).await;
    cart_response(&cart)
}
