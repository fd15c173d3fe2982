//! Checkout route handlers: order intake plus the simulated payment bridge.
//!
//! Order intake converts the session cart and the shipping form into an
//! order row with item-level line records. All validation happens before
//! the first database query; after the order row exists, item-insert
//! failures no longer fail the checkout (see
//! [`crate::db::orders::OrderRepository::create`]).

use axum::{Json, extract::State, response::Html};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use voltlane_core::{Email, PaymentStatus};

use crate::db::orders::{NewOrder, NewOrderItem, OrderRepository};
use crate::error::{AppError, Result};
use crate::models::{SessionUser, session_keys};
use crate::payment::CheckoutRequest;
use crate::routes::cart::{load_cart, save_cart};
use crate::state::AppState;

/// Shipping form submitted at checkout.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub full_name: String,
    pub phone: Option<String>,
    pub address: String,
}

/// Payment completion callback body.
#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    pub order_id: Uuid,
}

/// Get the signed-in identity from the session.
async fn require_user(session: &Session) -> Result<SessionUser> {
    session
        .get::<SessionUser>(session_keys::USER)
        .await
        .ok()
        .flatten()
        .ok_or_else(|| AppError::Unauthorized("Sign in to continue".to_string()))
}

/// Place an order from the session cart.
///
/// Preconditions, all checked before any query: an authenticated session
/// identity, a non-empty cart, and complete shipping fields.
#[instrument(skip(state, session, form))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<CheckoutForm>,
) -> Result<Json<serde_json::Value>> {
    let user = require_user(&session).await?;

    let full_name = form.full_name.trim();
    if full_name.is_empty() {
        return Err(AppError::Validation("Full name is required".to_string()));
    }
    let address = form.address.trim();
    if address.is_empty() {
        return Err(AppError::Validation(
            "Shipping address is required".to_string(),
        ));
    }

    let email = Email::parse(&user.email)
        .map_err(|e| AppError::Validation(format!("Invalid account email: {e}")))?;

    let mut cart = load_cart(&session).await;
    if cart.is_empty() {
        return Err(AppError::Validation("Your cart is empty".to_string()));
    }

    let items: Vec<NewOrderItem> = cart
        .lines()
        .iter()
        .map(|line| NewOrderItem {
            product_name: line.name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
        })
        .collect();

    let totals = cart.totals();
    let new_order = NewOrder {
        user_id: user.user_id,
        email: email.clone(),
        full_name: full_name.to_string(),
        phone: form.phone.clone(),
        address: address.to_string(),
        items,
    };

    let order_id = OrderRepository::new(state.pool()).create(&new_order).await?;
    tracing::info!(order_id = %order_id, "Order created");

    let payment_session = state.payment().create_session(&CheckoutRequest {
        amount: totals.total,
        currency: "usd".to_string(),
        customer_email: email,
        customer_name: full_name.to_string(),
    });

    // The order is placed; an emptied cart is nice-to-have
    cart.clear();
    save_cart(&session, &cart).await;

    Ok(Json(json!({
        "success": true,
        "order_id": order_id,
        "total": totals.total,
        "client_secret": payment_session.client_secret,
        "checkout_url": payment_session.checkout_url,
        "demo": payment_session.demo,
    })))
}

/// Payment success callback.
///
/// Only the signed-in identity that placed the order may mark it paid.
/// The simulated bridge reports success unconditionally; a real
/// processor integration would verify the payment intent before
/// flipping the status.
#[instrument(skip(state, session))]
pub async fn complete(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<CompleteRequest>,
) -> Result<Json<serde_json::Value>> {
    let user = require_user(&session).await?;

    let repository = OrderRepository::new(state.pool());
    let order = repository
        .get(request.order_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
    if order.user_id != user.user_id {
        // Do not confirm the order exists for other accounts
        return Err(AppError::NotFound("Order not found".to_string()));
    }

    repository
        .update_payment_status(request.order_id, PaymentStatus::Paid)
        .await?;

    Ok(Json(json!({
        "success": true,
        "order_id": request.order_id,
        "payment_status": PaymentStatus::Paid,
    })))
}

/// Static stand-in for a hosted checkout page.
///
/// The payment bridge's default checkout URL points here; the query
/// string carries the amount, currency, and redirect targets.
pub async fn demo_page() -> Html<&'static str> {
    Html(DEMO_CHECKOUT_PAGE)
}

const DEMO_CHECKOUT_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Voltlane demo checkout</title>
</head>
<body>
  <h1>Voltlane demo checkout</h1>
  <p>This is a simulated payment page. No card is charged.</p>
  <p id="summary"></p>
  <p><a id="pay" href="/">Complete payment</a></p>
  <script>
    const params = new URLSearchParams(window.location.search);
    const amount = params.get("amount");
    const currency = (params.get("currency") || "usd").toUpperCase();
    if (amount) {
      document.getElementById("summary").textContent =
        "Order total: " + amount + " " + currency;
    }
    const successUrl = params.get("success_url");
    if (successUrl) {
      document.getElementById("pay").href = successUrl;
    }
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_page_serves_simulated_checkout() {
        let Html(page) = demo_page().await;
        assert!(page.contains("demo checkout"));
        assert!(page.contains("No card is charged"));
        assert!(page.contains("success_url"));
    }
}
