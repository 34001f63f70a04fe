//! Connection pool lifecycle.
//!
//! The pool is opened once at startup, shared by every save, and closed
//! explicitly at shutdown with [`PgPool::close`].

use secrecy::ExposeSecret;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::survey_store::classify_sqlx_error;
use crate::config::DatabaseConfig;
use crate::ports::StoreError;

/// Opens a bounded pool using the configured sizes and timeouts.
///
/// # Errors
///
/// Returns a classified `StoreError` if the first connection cannot be
/// established. The message never contains the connection URL.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(Some(config.idle_timeout()))
        .max_lifetime(Some(config.max_lifetime()))
        .connect(config.url.expose_secret())
        .await
        .map_err(|e| classify_sqlx_error(&e))?;

    tracing::info!(
        min_connections = config.min_connections,
        max_connections = config.max_connections,
        "Database pool opened"
    );

    Ok(pool)
}

/// Applies the embedded `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| StoreError::permanent(format!("migration failed: {}", e)))?;

    tracing::info!("Database migrations applied");
    Ok(())
}
