//! Newsletter subscriber repository.
//!
//! Subscribers are upserted by email: subscribing an address that already
//! exists (even unsubscribed) reactivates the row instead of inserting a
//! duplicate.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use voltlane_core::{Email, SubscriberId, SubscriberStatus};

use super::RepositoryError;

/// A newsletter subscriber row.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Subscriber {
    pub id: SubscriberId,
    pub email: String,
    pub full_name: Option<String>,
    pub status: SubscriberStatus,
    pub created_at: DateTime<Utc>,
}

/// Repository for newsletter subscriber operations.
pub struct SubscriberRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubscriberRepository<'a> {
    /// Create a new subscriber repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Subscribe an email address, reactivating it if it already exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn subscribe(
        &self,
        email: &Email,
        full_name: Option<&str>,
    ) -> Result<Subscriber, RepositoryError> {
        let row = sqlx::query(
            r"
            INSERT INTO newsletter_subscribers (email, full_name, status)
            VALUES ($1, $2, 'active')
            ON CONFLICT (email) DO UPDATE
                SET status = 'active',
                    full_name = COALESCE(EXCLUDED.full_name, newsletter_subscribers.full_name)
            RETURNING id, email, full_name, status, created_at
            ",
        )
        .bind(email.as_str())
        .bind(full_name)
        .fetch_one(self.pool)
        .await?;

        subscriber_from_row(&row)
    }

    /// Mark an email address as unsubscribed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the email was never
    /// subscribed, or `RepositoryError::Database` if the query fails.
    pub async fn unsubscribe(&self, email: &Email) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE newsletter_subscribers
            SET status = 'unsubscribed'
            WHERE email = $1
            ",
        )
        .bind(email.as_str())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Number of active subscribers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_active(&self) -> Result<i64, RepositoryError> {
        let row = sqlx::query(
            r"
            SELECT COUNT(*) AS count
            FROM newsletter_subscribers
            WHERE status = 'active'
            ",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(row.try_get("count")?)
    }

    /// All subscribers, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored status is invalid.
    pub async fn list(&self) -> Result<Vec<Subscriber>, RepositoryError> {
        let rows = sqlx::query(
            r"
            SELECT id, email, full_name, status, created_at
            FROM newsletter_subscribers
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(subscriber_from_row).collect()
    }
}

/// Build a [`Subscriber`] from a database row.
pub(crate) fn subscriber_from_row(
    row: &sqlx::postgres::PgRow,
) -> Result<Subscriber, RepositoryError> {
    let status: String = row.try_get("status")?;

    Ok(Subscriber {
        id: SubscriberId::new(row.try_get("id")?),
        email: row.try_get("email")?,
        full_name: row.try_get("full_name")?,
        status: status
            .parse()
            .map_err(|e: String| RepositoryError::DataCorruption(e))?,
        created_at: row.try_get("created_at")?,
    })
}
