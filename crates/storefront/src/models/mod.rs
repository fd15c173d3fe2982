//! Session-backed models for the storefront.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session storage keys.
///
/// The cart, wishlist, and signed-in identity all live in the session,
/// which is what lets them survive page reloads.
pub mod session_keys {
    /// Serialized [`crate::cart::Cart`].
    pub const CART: &str = "voltlane.cart";
    /// Serialized [`crate::wishlist::Wishlist`].
    pub const WISHLIST: &str = "voltlane.wishlist";
    /// Serialized [`super::SessionUser`].
    pub const USER: &str = "voltlane.user";
}

/// The authenticated identity stored in the session.
///
/// Real authentication is delegated to an external provider; this is the
/// minimal identity the order-intake path needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: Uuid,
    pub email: String,
}
