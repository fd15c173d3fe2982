//! Admin database access.
//!
//! The admin binary reads the same tables the storefront writes, but its
//! queries are admin-shaped: whole-table listings for rollups and the
//! status update that only this binary is allowed to perform.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use voltlane_core::{OrderStatus, PaymentStatus};

use crate::error::AdminError;

/// Create a `PostgreSQL` connection pool.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection fails.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// An order as the admin views list it.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AdminOrder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

/// Repository for admin order operations.
pub struct AdminOrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminOrderRepository<'a> {
    /// Create a new admin order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Database` if the query fails, or
    /// `AdminError::DataCorruption` if a stored status is invalid.
    pub async fn list_all(&self) -> Result<Vec<AdminOrder>, AdminError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, email, full_name, total_amount,
                   status, payment_status, created_at
            FROM orders
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(order_from_row).collect()
    }

    /// Transition an order's status.
    ///
    /// Reads the current status first and rejects transitions
    /// [`OrderStatus::can_transition_to`] forbids, so a completed or
    /// cancelled order can never be reopened.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::NotFound` if the order does not exist,
    /// `AdminError::InvalidTransition` if the transition is forbidden, or
    /// `AdminError::Database` if a query fails.
    pub async fn update_status(&self, id: Uuid, new_status: OrderStatus) -> Result<(), AdminError> {
        let row = sqlx::query("SELECT status FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(AdminError::NotFound)?;

        let current: String = row.try_get("status")?;
        let current: OrderStatus = current.parse().map_err(AdminError::DataCorruption)?;

        if !current.can_transition_to(new_status) {
            return Err(AdminError::InvalidTransition {
                from: current,
                to: new_status,
            });
        }

        sqlx::query("UPDATE orders SET status = $1 WHERE id = $2")
            .bind(new_status.to_string())
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Count active newsletter subscribers.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Database` if the query fails.
    pub async fn count_active_subscribers(&self) -> Result<i64, AdminError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS count FROM newsletter_subscribers WHERE status = 'active'",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(row.try_get("count")?)
    }
}

/// Build an [`AdminOrder`] from a database row.
fn order_from_row(row: &sqlx::postgres::PgRow) -> Result<AdminOrder, AdminError> {
    let status: String = row.try_get("status")?;
    let payment_status: String = row.try_get("payment_status")?;

    Ok(AdminOrder {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        email: row.try_get("email")?,
        full_name: row.try_get("full_name")?,
        total_amount: row.try_get("total_amount")?,
        status: status.parse().map_err(AdminError::DataCorruption)?,
        payment_status: payment_status.parse().map_err(AdminError::DataCorruption)?,
        created_at: row.try_get("created_at")?,
    })
}
