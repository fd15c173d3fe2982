//! In-memory product review store and aggregation.
//!
//! Reviews are append-only and live for the lifetime of the process; a
//! restart regenerates the seeded fixture set. The store hangs off the
//! application state and is shared across handlers.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use voltlane_core::Rating;

/// Average rating reported for a product with no reviews yet.
const DEFAULT_AVERAGE: f64 = 5.0;

/// A product review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub product_id: String,
    pub user_name: String,
    pub rating: Rating,
    pub comment: String,
    pub date: DateTime<Utc>,
    /// Set only for reviews tied to a confirmed purchase. User-submitted
    /// reviews always start unverified.
    pub verified: bool,
}

/// Input for a user-submitted review.
#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    pub product_id: String,
    pub user_name: String,
    pub rating: Rating,
    pub comment: String,
}

/// Aggregated rating for one product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingSummary {
    /// Arithmetic mean rounded to one decimal, 5.0 with zero reviews.
    pub average: f64,
    pub count: usize,
}

/// Shared, append-only review collection.
///
/// Cheaply cloneable; all clones share the same underlying list.
#[derive(Debug, Clone, Default)]
pub struct ReviewStore {
    inner: Arc<RwLock<Vec<Review>>>,
}

impl ReviewStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with deterministic demo reviews.
    ///
    /// The same seed always produces the same fixture set, so restarts
    /// and tests see identical data.
    #[must_use]
    pub fn with_seed_data(seed: u64) -> Self {
        let store = Self::new();
        let mut reviews = store
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *reviews = seed_reviews(seed);
        drop(reviews);
        store
    }

    /// Append a review, assigning its id, date, and unverified flag.
    pub fn add(&self, new: NewReview) -> Review {
        let review = Review {
            id: Uuid::new_v4(),
            product_id: new.product_id,
            user_name: new.user_name,
            rating: new.rating,
            comment: new.comment,
            date: Utc::now(),
            verified: false,
        };

        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(review.clone());

        review
    }

    /// All reviews for a product, newest first.
    #[must_use]
    pub fn by_product(&self, product_id: &str) -> Vec<Review> {
        let mut reviews: Vec<Review> = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.date.cmp(&a.date));
        reviews
    }

    /// Number of reviews for a product.
    #[must_use]
    pub fn count(&self, product_id: &str) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| r.product_id == product_id)
            .count()
    }

    /// Average rating for a product, rounded to one decimal.
    ///
    /// A product with no reviews reports [`DEFAULT_AVERAGE`].
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // review counts stay far below 2^52
    pub fn average(&self, product_id: &str) -> f64 {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let ratings: Vec<u8> = guard
            .iter()
            .filter(|r| r.product_id == product_id)
            .map(|r| r.rating.as_u8())
            .collect();
        drop(guard);

        if ratings.is_empty() {
            return DEFAULT_AVERAGE;
        }

        let sum: u32 = ratings.iter().map(|&r| u32::from(r)).sum();
        let mean = f64::from(sum) / ratings.len() as f64;
        (mean * 10.0).round() / 10.0
    }

    /// Average and count in one call.
    #[must_use]
    pub fn summary(&self, product_id: &str) -> RatingSummary {
        RatingSummary {
            average: self.average(product_id),
            count: self.count(product_id),
        }
    }
}

/// Product slugs that receive seeded demo reviews.
const SEED_PRODUCTS: &[&str] = &[
    "volt-65w-gan-charger",
    "braid-usbc-cable",
    "magflow-wireless-pad",
    "roam-powerbank-10k",
    "duo-car-charger",
];

const SEED_NAMES: &[&str] = &[
    "Maya R.", "Jordan K.", "Sam T.", "Priya N.", "Alex B.", "Casey L.", "Dani M.", "Robin S.",
];

const SEED_COMMENTS: &[&str] = &[
    "Charges my laptop and phone at the same time without breaking a sweat.",
    "Cable feels sturdy, no fraying after months of daily use.",
    "Exactly as described. Fast shipping too.",
    "Smaller than my old charger and twice as fast.",
    "Works great with my case on, which my last pad never managed.",
    "Solid build quality for the price.",
    "Gets a little warm under load but nothing concerning.",
    "Bought a second one for the office.",
];

/// Generate the deterministic demo review set.
fn seed_reviews(seed: u64) -> Vec<Review> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut reviews = Vec::new();

    for product_id in SEED_PRODUCTS {
        let per_product = rng.random_range(3..=6);
        for _ in 0..per_product {
            // Skew toward positive ratings like a real storefront
            let raw = *[4, 5, 5, 4, 3, 5]
                .get(rng.random_range(0..6))
                .unwrap_or(&5);
            // Seed table only contains 3..=5
            let Ok(rating) = Rating::new(raw) else {
                continue;
            };

            let name_idx = rng.random_range(0..SEED_NAMES.len());
            let comment_idx = rng.random_range(0..SEED_COMMENTS.len());
            let days_ago = i64::from(rng.random_range(1..365_u32));

            reviews.push(Review {
                id: Uuid::new_v4(),
                product_id: (*product_id).to_string(),
                user_name: SEED_NAMES.get(name_idx).copied().unwrap_or("Anonymous").to_string(),
                rating,
                comment: SEED_COMMENTS
                    .get(comment_idx)
                    .copied()
                    .unwrap_or_default()
                    .to_string(),
                date: Utc::now() - Duration::days(days_ago),
                verified: rng.random_bool(0.6),
            });
        }
    }

    reviews
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn new_review(product_id: &str, rating: u8) -> NewReview {
        NewReview {
            product_id: product_id.to_string(),
            user_name: "Test User".to_string(),
            rating: Rating::new(rating).unwrap(),
            comment: "A comment".to_string(),
        }
    }

    #[test]
    fn test_average_defaults_to_five_with_no_reviews() {
        let store = ReviewStore::new();
        assert_eq!(store.average("unknown-product"), 5.0);
        assert_eq!(store.count("unknown-product"), 0);
    }

    #[test]
    fn test_average_rounds_to_one_decimal() {
        let store = ReviewStore::new();
        store.add(new_review("p1", 5));
        store.add(new_review("p1", 5));
        store.add(new_review("p1", 4));

        // 14 / 3 = 4.666... -> 4.7
        assert_eq!(store.average("p1"), 4.7);
        assert_eq!(store.count("p1"), 3);
    }

    #[test]
    fn test_add_assigns_metadata_and_forces_unverified() {
        let store = ReviewStore::new();
        let before = Utc::now();
        let review = store.add(new_review("p1", 3));

        assert!(!review.verified);
        assert!(review.date >= before);
        assert_eq!(review.rating.as_u8(), 3);
    }

    #[test]
    fn test_by_product_filters_and_sorts_newest_first() {
        let store = ReviewStore::new();
        store.add(new_review("p1", 4));
        store.add(new_review("p2", 2));
        store.add(new_review("p1", 5));

        let reviews = store.by_product("p1");
        assert_eq!(reviews.len(), 2);
        assert!(reviews.iter().all(|r| r.product_id == "p1"));
        assert!(reviews[0].date >= reviews[1].date);
    }

    #[test]
    fn test_summary() {
        let store = ReviewStore::new();
        store.add(new_review("p1", 4));
        store.add(new_review("p1", 2));

        let summary = store.summary("p1");
        assert_eq!(summary.average, 3.0);
        assert_eq!(summary.count, 2);
    }

    #[test]
    fn test_seed_data_is_deterministic() {
        let a = ReviewStore::with_seed_data(42);
        let b = ReviewStore::with_seed_data(42);

        for product in SEED_PRODUCTS {
            assert_eq!(a.count(product), b.count(product));
            assert_eq!(a.average(product), b.average(product));
            assert!(a.count(product) >= 3);
        }
    }

    #[test]
    fn test_seed_ratings_in_valid_range() {
        let store = ReviewStore::with_seed_data(7);
        for product in SEED_PRODUCTS {
            for review in store.by_product(product) {
                assert!((1..=5).contains(&review.rating.as_u8()));
            }
        }
    }

    #[test]
    fn test_clones_share_state() {
        let store = ReviewStore::new();
        let clone = store.clone();
        store.add(new_review("p1", 5));

        assert_eq!(clone.count("p1"), 1);
    }
}
