//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! voltlane-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)
//!
//! Migration files live in `crates/storefront/migrations/`; both the
//! storefront and the admin binary read the same schema.

use super::{CommandError, connect};

/// Run database migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database URL is missing, the connection
/// fails, or a migration fails to apply.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
