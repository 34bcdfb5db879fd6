use crate::core::config::DatabaseConfig;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await
}

/// Create the pool, retrying while the database container is still starting up.
pub async fn connect_with_retry(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let mut attempt = 1;
    loop {
        match create_pool(config).await {
            Ok(pool) => return Ok(pool),
            Err(e) if attempt < config.connect_retries => {
                tracing::warn!(
                    "Database not ready (attempt {}/{}): {}",
                    attempt,
                    config.connect_retries,
                    e
                );
                attempt += 1;
                tokio::time::sleep(config.connect_retry_delay).await;
            }
            Err(e) => {
                tracing::error!(
                    "Could not connect to the database after {} attempts",
                    config.connect_retries
                );
                return Err(e);
            }
        }
    }
}

/// Round trip used by the health endpoint
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}
