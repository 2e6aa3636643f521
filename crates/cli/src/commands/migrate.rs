//! Database migration command.
//!
//! Migrations live in `crates/server/migrations/` and are embedded at build
//! time by `sqlx::migrate!`.
//!
//! ```text
//! migrations/
//! ├── 20241001000001_create_orders.sql
//! ├── 20241001000002_create_lineitems.sql
//! └── 20241001000003_lineitems_name_trgm.sql
//! ```

use thiserror::Error;
use tracing::info;

use snackfinder_server::config::{ConfigError, database_url_from_env};
use snackfinder_server::db;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run all pending migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the database URL is missing, the database is
/// unreachable, or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let database_url = database_url_from_env()?;

    info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    info!("Migrations complete!");
    Ok(())
}
