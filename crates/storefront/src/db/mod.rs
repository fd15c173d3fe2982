//! Database operations for the storefront `PostgreSQL` database.
//!
//! # Tables
//!
//! - `orders` / `order_items` - order intake records
//! - `newsletter_subscribers` - upserted by email
//! - `sessions` - tower-sessions storage (cart, wishlist, identity)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p voltlane-cli -- migrate
//! ```

pub mod newsletter;
pub mod orders;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The underlying query failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The query did not complete within the allowed time.
    #[error("database operation timed out")]
    Timeout,

    /// The targeted row does not exist.
    #[error("not found")]
    NotFound,

    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A stored value could not be interpreted.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

impl RepositoryError {
    /// A message safe to show to the shopper.
    ///
    /// Remote-store failures are pattern-matched on the error text the way
    /// the frontend expects: missing tables and permission denials get
    /// friendly guidance, timeouts get a distinct message, and anything
    /// else passes through verbatim.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Database(e) => {
                let text = e.to_string();
                let lower = text.to_lowercase();
                if lower.contains("does not exist") && lower.contains("relation") {
                    "A required table is missing. Run the database migrations and try again."
                        .to_string()
                } else if lower.contains("row-level security") || lower.contains("permission denied")
                {
                    "You don't have permission to perform this action.".to_string()
                } else {
                    text
                }
            }
            Self::Timeout => "The request timed out. Please try again.".to_string(),
            Self::NotFound => "The requested record was not found.".to_string(),
            Self::Conflict(msg) | Self::DataCorruption(msg) => msg.clone(),
        }
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
