//! Shopping cart model and pricing rules.
//!
//! The cart is a plain serializable value: handlers load it from the
//! session, mutate it here, and write it back. All operations are total
//! functions over the line list - there are no error cases.
//!
//! # Pricing
//!
//! - `subtotal` = sum of `unit_price * quantity` over all lines
//! - `shipping` = free above $100 subtotal, otherwise a flat $10
//! - `tax` = 8% of the subtotal
//! - `total` = subtotal + shipping + tax
//!
//! Prices are always per-unit amounts; every consumer extends them with
//! the quantity explicitly. All math is `Decimal`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Subtotal above which shipping is free.
fn free_shipping_threshold() -> Decimal {
    Decimal::ONE_HUNDRED
}

/// Flat shipping charge below the free-shipping threshold.
fn flat_shipping() -> Decimal {
    Decimal::TEN
}

/// Sales tax rate applied to the subtotal.
fn tax_rate() -> Decimal {
    Decimal::new(8, 2) // 0.08
}

/// The identity of a cart line.
///
/// A line is one purchasable configuration: the same product in a
/// different color or material is a separate line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: String,
    pub color: Option<String>,
    pub material: Option<String>,
}

/// One cart line: a purchasable configuration with a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    /// Per-unit price. Never a pre-extended line amount.
    pub unit_price: Decimal,
    pub image: String,
    pub quantity: u32,
    pub color: Option<String>,
    pub material: Option<String>,
}

impl CartLine {
    /// The identity key for this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id.clone(),
            color: self.color.clone(),
            material: self.material.clone(),
        }
    }

    /// The extended price for this line (`unit_price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Derived cart pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// A shopping cart: an ordered list of lines, unique by [`LineKey`].
///
/// Lines never have a zero quantity; dropping a quantity to zero removes
/// the line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add a line to the cart.
    ///
    /// If a line with the same `(product_id, color, material)` key already
    /// exists, its quantity is incremented instead of adding a second line.
    /// Adding with quantity 0 is a no-op.
    pub fn add(&mut self, line: CartLine) {
        if line.quantity == 0 {
            return;
        }

        let key = line.key();
        match self.lines.iter_mut().find(|l| l.key() == key) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => self.lines.push(line),
        }
    }

    /// Remove the line with the given key. Unknown keys are a no-op.
    pub fn remove(&mut self, key: &LineKey) {
        self.lines.retain(|l| l.key() != *key);
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of 0 removes the line, making this equivalent to
    /// [`Cart::remove`]. Unknown keys are a no-op.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: u32) {
        if quantity == 0 {
            self.remove(key);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.key() == *key) {
            line.quantity = quantity;
        }
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Sum of extended line prices.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Compute the full pricing breakdown.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        let subtotal = self.subtotal();
        let shipping = if subtotal > free_shipping_threshold() {
            Decimal::ZERO
        } else {
            flat_shipping()
        };
        let tax = subtotal * tax_rate();
        let total = subtotal + shipping + tax;

        CartTotals {
            subtotal,
            shipping,
            tax,
            total,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn line(product_id: &str, price: i64, quantity: u32) -> CartLine {
        CartLine {
            product_id: product_id.to_string(),
            name: format!("Product {product_id}"),
            unit_price: Decimal::new(price, 0),
            image: format!("/images/{product_id}.webp"),
            quantity,
            color: None,
            material: None,
        }
    }

    fn line_with_variant(
        product_id: &str,
        price: i64,
        quantity: u32,
        color: &str,
        material: &str,
    ) -> CartLine {
        CartLine {
            color: Some(color.to_string()),
            material: Some(material.to_string()),
            ..line(product_id, price, quantity)
        }
    }

    #[test]
    fn test_add_same_key_merges_into_one_line() {
        let mut cart = Cart::new();
        cart.add(line("braid-usbc-cable", 19, 1));
        cart.add(line("braid-usbc-cable", 19, 1));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_add_different_variants_are_separate_lines() {
        let mut cart = Cart::new();
        cart.add(line_with_variant("braid-usbc-cable", 19, 1, "black", "nylon"));
        cart.add(line_with_variant("braid-usbc-cable", 19, 1, "white", "nylon"));
        cart.add(line_with_variant("braid-usbc-cable", 19, 1, "black", "silicone"));

        assert_eq!(cart.lines().len(), 3);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_zero_quantity_is_noop() {
        let mut cart = Cart::new();
        cart.add(line("volt-65w-gan", 49, 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let target = line("volt-65w-gan", 49, 2);
        let key = target.key();

        let mut via_set = Cart::new();
        via_set.add(target.clone());
        via_set.add(line("roam-powerbank", 39, 1));
        via_set.set_quantity(&key, 0);

        let mut via_remove = Cart::new();
        via_remove.add(target);
        via_remove.add(line("roam-powerbank", 39, 1));
        via_remove.remove(&key);

        assert_eq!(via_set, via_remove);
        assert_eq!(via_set.lines().len(), 1);
    }

    #[test]
    fn test_set_quantity_updates_existing_line() {
        let mut cart = Cart::new();
        let l = line("volt-65w-gan", 49, 1);
        let key = l.key();
        cart.add(l);

        cart.set_quantity(&key, 5);
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_set_quantity_unknown_key_is_noop() {
        let mut cart = Cart::new();
        cart.add(line("volt-65w-gan", 49, 1));

        let unknown = line("magflow-pad", 59, 1).key();
        cart.set_quantity(&unknown, 3);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(line("volt-65w-gan", 49, 2));
        cart.add(line("roam-powerbank", 39, 1));

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }

    #[test]
    fn test_item_count_is_sum_of_quantities() {
        let mut cart = Cart::new();
        cart.add(line("a", 10, 2));
        cart.add(line("b", 20, 3));
        cart.add(line("c", 30, 1));

        assert_eq!(cart.item_count(), 6);
    }

    // Worked example from the pricing rules: subtotal 130 clears the
    // free-shipping threshold.
    #[test]
    fn test_totals_above_free_shipping_threshold() {
        let mut cart = Cart::new();
        cart.add(line("a", 50, 2));
        cart.add(line("b", 30, 1));

        let totals = cart.totals();
        assert_eq!(totals.subtotal, Decimal::new(130, 0));
        assert_eq!(totals.shipping, Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::new(104, 1)); // 10.4
        assert_eq!(totals.total, Decimal::new(1404, 1)); // 140.4
    }

    // Worked example: subtotal 80 pays flat shipping.
    #[test]
    fn test_totals_below_free_shipping_threshold() {
        let mut cart = Cart::new();
        cart.add(line("a", 40, 2));

        let totals = cart.totals();
        assert_eq!(totals.subtotal, Decimal::new(80, 0));
        assert_eq!(totals.shipping, Decimal::TEN);
        assert_eq!(totals.tax, Decimal::new(64, 1)); // 6.4
        assert_eq!(totals.total, Decimal::new(964, 1)); // 96.4
    }

    // The threshold is strict: exactly 100 still pays shipping.
    #[test]
    fn test_totals_at_exact_threshold_pays_shipping() {
        let mut cart = Cart::new();
        cart.add(line("a", 100, 1));

        let totals = cart.totals();
        assert_eq!(totals.shipping, Decimal::TEN);
    }

    #[test]
    fn test_totals_empty_cart() {
        let cart = Cart::new();
        let totals = cart.totals();

        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.shipping, Decimal::TEN);
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::TEN);
    }

    // The totals identity holds across an arbitrary operation sequence.
    #[test]
    fn test_totals_identity_after_mixed_operations() {
        let mut cart = Cart::new();
        cart.add(line("a", 25, 1));
        cart.add(line("b", 15, 4));
        cart.add(line("a", 25, 2));
        let key_b = line("b", 15, 1).key();
        cart.set_quantity(&key_b, 2);
        cart.remove(&line("missing", 1, 1).key());

        let expected_subtotal: Decimal = cart
            .lines()
            .iter()
            .map(|l| l.unit_price * Decimal::from(l.quantity))
            .sum();
        let expected_count: u32 = cart.lines().iter().map(|l| l.quantity).sum();

        let totals = cart.totals();
        assert_eq!(totals.subtotal, expected_subtotal);
        assert_eq!(cart.item_count(), expected_count);
        assert_eq!(
            totals.total,
            totals.subtotal + totals.shipping + totals.tax
        );
    }

    #[test]
    fn test_fractional_prices() {
        let mut cart = Cart::new();
        cart.add(CartLine {
            unit_price: Decimal::new(1999, 2), // 19.99
            ..line("braid-usbc-cable", 0, 3)
        });

        let totals = cart.totals();
        assert_eq!(totals.subtotal, Decimal::new(5997, 2)); // 59.97
        assert_eq!(totals.shipping, Decimal::TEN);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut cart = Cart::new();
        cart.add(line_with_variant("braid-usbc-cable", 19, 2, "black", "nylon"));

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }
}
