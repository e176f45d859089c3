//! Database connection pool initialisation.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

use crate::config::DatabaseConfig;

const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors that can occur during database initialisation.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Create a connection pool from the configured connection string and run
/// pending migrations.
pub async fn connect_and_migrate(config: &DatabaseConfig) -> Result<PgPool, DbError> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(&config.connection_string())
        .await?;

    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.name,
        "Connected to database"
    );

    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}
