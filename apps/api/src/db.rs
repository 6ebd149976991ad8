use std::sync::Arc;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;
use crate::store::{MemoryUserStore, PgUserStore, UserStore};

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Builds the document store selected by `DATABASE_URL`, applying migrations
/// for the Postgres backend.
pub async fn create_store(config: &Config) -> Result<Arc<dyn UserStore>> {
    if config.uses_memory_store() {
        info!("Using in-memory document store; data is lost on exit");
        return Ok(Arc::new(MemoryUserStore::new()));
    }

    let store = PgUserStore::new(create_pool(&config.database_url).await?);
    store.migrate().await?;
    Ok(Arc::new(store))
}
