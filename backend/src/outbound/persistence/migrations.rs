//! Embedded schema migrations, applied at startup.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Why migrations did not complete.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// The database refused the connection.
    #[error("failed to connect for migrations: {0}")]
    Connect(String),
    /// A migration script failed.
    #[error("failed to apply migrations: {0}")]
    Apply(String),
    /// The blocking task died.
    #[error("migration task panicked: {0}")]
    Join(String),
}

fn run_blocking(database_url: &str) -> Result<usize, MigrationError> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| MigrationError::Connect(err.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply(err.to_string()))?;
    Ok(applied.len())
}

/// Apply pending migrations over a dedicated synchronous connection.
///
/// Diesel's migration harness is blocking, so the work runs on the blocking
/// thread pool.
///
/// # Errors
/// See [`MigrationError`].
pub async fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_blocking(&url))
        .await
        .map_err(|err| MigrationError::Join(err.to_string()))??;
    info!(applied, "database migrations up to date");
    Ok(())
}
