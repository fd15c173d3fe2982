//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (database ping)
//!
//! # Cart
//! GET  /cart                        - Cart with pricing breakdown
//! POST /cart/add                    - Add line (merges on product/color/material)
//! POST /cart/update                 - Set line quantity (0 removes)
//! POST /cart/remove                 - Remove line
//! POST /cart/clear                  - Empty the cart
//!
//! # Wishlist
//! GET  /wishlist                    - Saved products
//! POST /wishlist/toggle             - Save/unsave a product
//!
//! # Checkout & orders
//! POST /checkout                    - Order intake + simulated payment session
//! POST /checkout/complete           - Payment success callback (owner only)
//! GET  /demo-checkout               - Static simulated payment page
//! GET  /orders                      - Signed-in user's order history
//! GET  /orders/{id}                 - One order with item lines
//!
//! # Reviews
//! GET  /products/{id}/reviews       - Reviews + average/count
//! POST /products/{id}/reviews       - Submit a review
//!
//! # Newsletter
//! POST /newsletter/subscribe        - Upsert subscriber by email
//! POST /newsletter/unsubscribe      - Set status to unsubscribed
//!
//! # Session
//! POST /session/login-demo          - Demo identity (auth is delegated)
//! GET  /session                     - Current identity
//! ```

pub mod cart;
pub mod checkout;
pub mod newsletter;
pub mod orders;
pub mod reviews;
pub mod session;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/toggle", post(wishlist::toggle))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
}

/// Create the newsletter routes router.
pub fn newsletter_routes() -> Router<AppState> {
    Router::new()
        .route("/subscribe", post(newsletter::subscribe))
        .route("/unsubscribe", post(newsletter::unsubscribe))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .route("/checkout", post(checkout::create))
        .route("/checkout/complete", post(checkout::complete))
        .route("/demo-checkout", get(checkout::demo_page))
        .nest("/orders", order_routes())
        .route(
            "/products/{id}/reviews",
            get(reviews::index).post(reviews::create),
        )
        .nest("/newsletter", newsletter_routes())
        .route("/session", get(session::show))
        .route("/session/login-demo", post(session::login_demo))
}
