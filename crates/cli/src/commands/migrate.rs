//! Database migration command.
//!
//! # Environment Variables
//!
//! - `REGISTRY_DATABASE_URL` - `PostgreSQL` connection string (falls back
//!   to `DATABASE_URL`)
//!
//! Migration files live in `crates/api/migrations/` and are embedded at
//! compile time, so the CLI binary is self-contained.

use sqlx::PgPool;

/// Errors that can occur while migrating.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run registry database migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the database URL is missing, the
/// connection fails, or a migration cannot be applied.
pub async fn registry() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("REGISTRY_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| MigrationError::MissingEnvVar("REGISTRY_DATABASE_URL"))?;

    tracing::info!("Connecting to registry database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running registry migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Registry migrations complete!");
    Ok(())
}
