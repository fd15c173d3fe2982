//! Order repository.
//!
//! Order intake inserts the order row first and the item rows second,
//! without a wrapping transaction: if the item inserts fail after the
//! order row exists, the failure is logged and the order is still
//! reported as created. That partial-failure policy is deliberate and
//! matches what the admin tooling expects.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use tokio::time::timeout;
use uuid::Uuid;

use voltlane_core::{Email, OrderItemId, OrderStatus, PaymentStatus};

use super::RepositoryError;

/// Hard ceiling on each order-intake insert.
const INSERT_TIMEOUT: Duration = Duration::from_secs(10);

/// A persisted order.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub address: String,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

/// A persisted order line.
#[derive(Debug, Clone, serde::Serialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: Uuid,
    pub product_name: String,
    pub quantity: u32,
    /// Per-unit price; the line amount is `unit_price * quantity`.
    pub unit_price: Decimal,
}

/// Input for creating an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Uuid,
    pub email: Email,
    pub full_name: String,
    pub phone: Option<String>,
    pub address: String,
    pub items: Vec<NewOrderItem>,
}

/// Input for one order line.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl NewOrderItem {
    /// The extended price for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

impl NewOrder {
    /// The order total: sum of extended line prices.
    ///
    /// Computed once at creation time and stored on the order row; it is
    /// not re-validated afterwards.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.items.iter().map(NewOrderItem::line_total).sum()
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order with its item rows.
    ///
    /// The caller is responsible for validating that `new.items` is
    /// non-empty before reaching this method.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Timeout` if the order insert exceeds 10
    /// seconds, or `RepositoryError::Database` if it fails outright. Each
    /// item insert races its own 10 second budget; item failures and
    /// timeouts after a successful order insert are logged and swallowed,
    /// and the order id is still returned.
    pub async fn create(&self, new: &NewOrder) -> Result<Uuid, RepositoryError> {
        let order_id = Uuid::new_v4();
        let total_amount = new.total_amount();

        let order_insert = sqlx::query(
            r"
            INSERT INTO orders
                (id, user_id, email, full_name, phone, address,
                 total_amount, status, payment_status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(order_id)
        .bind(new.user_id)
        .bind(new.email.as_str())
        .bind(&new.full_name)
        .bind(&new.phone)
        .bind(&new.address)
        .bind(total_amount)
        .bind(OrderStatus::Pending.to_string())
        .bind(PaymentStatus::Pending.to_string())
        .execute(self.pool);

        timeout(INSERT_TIMEOUT, order_insert)
            .await
            .map_err(|_| RepositoryError::Timeout)??;

        self.insert_items(order_id, &new.items).await;

        Ok(order_id)
    }

    /// Insert the item rows, logging and swallowing per-row failures.
    ///
    /// Each row gets its own insert budget so one stuck statement cannot
    /// starve the remaining lines.
    async fn insert_items(&self, order_id: Uuid, items: &[NewOrderItem]) {
        for item in items {
            let insert = sqlx::query(
                r"
                INSERT INTO order_items (order_id, product_name, quantity, unit_price)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(order_id)
            .bind(&item.product_name)
            .bind(i32::try_from(item.quantity).unwrap_or(i32::MAX))
            .bind(item.unit_price)
            .execute(self.pool);

            // Partial-failure policy: the order row already exists and
            // stays; a missing line is an admin-visible gap, not a
            // checkout failure.
            match timeout(INSERT_TIMEOUT, insert).await {
                Ok(Ok(_)) => {}
                Ok(Err(e)) => {
                    tracing::error!(
                        order_id = %order_id,
                        product = %item.product_name,
                        "Failed to insert order item: {e}"
                    );
                }
                Err(_) => {
                    tracing::error!(
                        order_id = %order_id,
                        product = %item.product_name,
                        "Order item insert timed out"
                    );
                }
            }
        }
    }

    /// Get an order by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored status is invalid.
    pub async fn get(&self, id: Uuid) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, email, full_name, phone, address,
                   total_amount, status, payment_status, created_at
            FROM orders
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| order_from_row(&r)).transpose()
    }

    /// List a user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored status is invalid.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, email, full_name, phone, address,
                   total_amount, status, payment_status, created_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(order_from_row).collect()
    }

    /// Get the item rows for an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items(&self, order_id: Uuid) -> Result<Vec<OrderItem>, RepositoryError> {
        let rows = sqlx::query(
            r"
            SELECT id, order_id, product_name, quantity, unit_price
            FROM order_items
            WHERE order_id = $1
            ORDER BY id ASC
            ",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        let mut items = Vec::with_capacity(rows.len());
        for r in rows {
            let quantity: i32 = r.try_get("quantity")?;
            items.push(OrderItem {
                id: OrderItemId::new(r.try_get("id")?),
                order_id: r.try_get("order_id")?,
                product_name: r.try_get("product_name")?,
                quantity: u32::try_from(quantity).unwrap_or(0),
                unit_price: r.try_get("unit_price")?,
            });
        }
        Ok(items)
    }

    /// Update the payment status of an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist, or
    /// `RepositoryError::Database` if the query fails.
    pub async fn update_payment_status(
        &self,
        id: Uuid,
        payment_status: PaymentStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE orders
            SET payment_status = $1
            WHERE id = $2
            ",
        )
        .bind(payment_status.to_string())
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// Build an [`Order`] from a database row.
pub(crate) fn order_from_row(row: &sqlx::postgres::PgRow) -> Result<Order, RepositoryError> {
    let status: String = row.try_get("status")?;
    let payment_status: String = row.try_get("payment_status")?;

    Ok(Order {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        email: row.try_get("email")?,
        full_name: row.try_get("full_name")?,
        phone: row.try_get("phone")?,
        address: row.try_get("address")?,
        total_amount: row.try_get("total_amount")?,
        status: status
            .parse()
            .map_err(|e: String| RepositoryError::DataCorruption(e))?,
        payment_status: payment_status
            .parse()
            .map_err(|e: String| RepositoryError::DataCorruption(e))?,
        created_at: row.try_get("created_at")?,
    })
}
