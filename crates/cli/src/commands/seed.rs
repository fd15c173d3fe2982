//! Seed command for local development data.
//!
//! Inserts a handful of newsletter subscribers and demo orders so the
//! admin dashboard has something to roll up. Safe to re-run: subscriber
//! inserts are upserts and order ids are fresh UUIDs each time.

use rust_decimal::Decimal;
use uuid::Uuid;

use voltlane_core::{OrderStatus, PaymentStatus, SubscriberStatus};

use super::{CommandError, connect};

const SEED_SUBSCRIBERS: &[(&str, Option<&str>)] = &[
    ("ada@example.com", Some("Ada Lovelace")),
    ("grace@example.com", Some("Grace Hopper")),
    ("deals@example.com", None),
];

/// `(product_name, quantity, unit_price_cents)` per demo order line.
const SEED_ORDERS: &[&[(&str, u32, i64)]] = &[
    &[("Volt 65W GaN Charger", 1, 4999), ("Braid USB-C Cable", 2, 1499)],
    &[("Roam Powerbank 10K", 1, 3999)],
    &[("MagFlow Wireless Pad", 1, 2999), ("Duo Car Charger", 1, 1999)],
];

/// Seed the database with sample data.
///
/// # Errors
///
/// Returns `CommandError` if the database URL is missing or any insert
/// fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Seeding newsletter subscribers...");
    for (email, full_name) in SEED_SUBSCRIBERS {
        sqlx::query(
            r"
            INSERT INTO newsletter_subscribers (email, full_name, status)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            ",
        )
        .bind(email)
        .bind(full_name)
        .bind(SubscriberStatus::Active.to_string())
        .execute(&pool)
        .await?;
    }

    tracing::info!("Seeding demo orders...");
    for (index, lines) in SEED_ORDERS.iter().enumerate() {
        let order_id = Uuid::new_v4();
        let total: Decimal = lines
            .iter()
            .map(|(_, quantity, cents)| Decimal::new(*cents, 2) * Decimal::from(*quantity))
            .sum();

        sqlx::query(
            r"
            INSERT INTO orders
                (id, user_id, email, full_name, phone, address,
                 total_amount, status, payment_status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(order_id)
        .bind(Uuid::new_v4())
        .bind(format!("demo{index}@example.com"))
        .bind(format!("Demo Shopper {index}"))
        .bind(Option::<String>::None)
        .bind("1 Demo Street")
        .bind(total)
        .bind(OrderStatus::Pending.to_string())
        .bind(PaymentStatus::Pending.to_string())
        .execute(&pool)
        .await?;

        for (product_name, quantity, cents) in *lines {
            sqlx::query(
                r"
                INSERT INTO order_items (order_id, product_name, quantity, unit_price)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(order_id)
            .bind(product_name)
            .bind(i32::try_from(*quantity).unwrap_or(i32::MAX))
            .bind(Decimal::new(*cents, 2))
            .execute(&pool)
            .await?;
        }
    }

    tracing::info!("Seed complete!");
    Ok(())
}
