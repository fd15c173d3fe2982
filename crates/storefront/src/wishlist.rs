//! Wishlist model.
//!
//! A wishlist is a set of products keyed by product ID, persisted to the
//! session the same way the cart is. Unlike cart lines there is no
//! quantity and no variant dimension.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One saved product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub product_id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub image: String,
}

/// A set of saved products, unique by product ID.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wishlist {
    entries: Vec<WishlistEntry>,
}

impl Wishlist {
    /// Create an empty wishlist.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The saved entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    /// Whether a product is on the wishlist.
    #[must_use]
    pub fn contains(&self, product_id: &str) -> bool {
        self.entries.iter().any(|e| e.product_id == product_id)
    }

    /// Add an entry. Adding an already-saved product is a no-op.
    pub fn add(&mut self, entry: WishlistEntry) {
        if !self.contains(&entry.product_id) {
            self.entries.push(entry);
        }
    }

    /// Remove a product. Unknown products are a no-op.
    pub fn remove(&mut self, product_id: &str) {
        self.entries.retain(|e| e.product_id != product_id);
    }

    /// Add the entry if absent, remove it if present.
    ///
    /// Returns `true` if the product is on the wishlist afterwards.
    pub fn toggle(&mut self, entry: WishlistEntry) -> bool {
        if self.contains(&entry.product_id) {
            self.remove(&entry.product_id);
            false
        } else {
            self.add(entry);
            true
        }
    }

    /// Number of saved products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the wishlist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(product_id: &str) -> WishlistEntry {
        WishlistEntry {
            product_id: product_id.to_string(),
            name: format!("Product {product_id}"),
            unit_price: Decimal::new(49, 0),
            image: format!("/images/{product_id}.webp"),
        }
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut wishlist = Wishlist::new();
        wishlist.add(entry("volt-65w-gan"));
        wishlist.add(entry("volt-65w-gan"));

        assert_eq!(wishlist.len(), 1);
        assert!(wishlist.contains("volt-65w-gan"));
    }

    #[test]
    fn test_remove() {
        let mut wishlist = Wishlist::new();
        wishlist.add(entry("volt-65w-gan"));
        wishlist.add(entry("roam-powerbank"));

        wishlist.remove("volt-65w-gan");
        assert!(!wishlist.contains("volt-65w-gan"));
        assert!(wishlist.contains("roam-powerbank"));

        // Unknown product is a no-op
        wishlist.remove("missing");
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_toggle() {
        let mut wishlist = Wishlist::new();

        assert!(wishlist.toggle(entry("magflow-pad")));
        assert!(wishlist.contains("magflow-pad"));

        assert!(!wishlist.toggle(entry("magflow-pad")));
        assert!(wishlist.is_empty());
    }
}
