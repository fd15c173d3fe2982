//! Application state shared across handlers.
//!
//! The old frontend reached cart/review/payment helpers through global
//! context singletons; here every shared collaborator is an explicit
//! field on [`AppState`] and handlers receive it by extraction.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::payment::{PaymentBridge, PaymentError};
use crate::reviews::ReviewStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    reviews: ReviewStore,
    payment: PaymentBridge,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Seeds the in-memory review store from the configured seed and
    /// builds the payment bridge from the checkout URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured checkout URL is invalid.
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Result<Self, PaymentError> {
        let payment = PaymentBridge::new(
            &config.payment.checkout_url,
            &config.base_url,
            config.payment.demo_mode,
        )?;
        let reviews = ReviewStore::with_seed_data(config.review_seed);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                reviews,
                payment,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the shared review store.
    #[must_use]
    pub fn reviews(&self) -> &ReviewStore {
        &self.inner.reviews
    }

    /// Get a reference to the payment bridge.
    #[must_use]
    pub fn payment(&self) -> &PaymentBridge {
        &self.inner.payment
    }
}
