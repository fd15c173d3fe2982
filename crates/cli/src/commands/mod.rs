//! CLI command implementations.

pub mod migrate;
pub mod seed;

use sqlx::PgPool;
use thiserror::Error;

/// Errors shared by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Connect to the database named by `STOREFRONT_DATABASE_URL` (falling
/// back to `DATABASE_URL`).
pub(crate) async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CommandError::MissingEnvVar("STOREFRONT_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    Ok(PgPool::connect(&database_url).await?)
}
