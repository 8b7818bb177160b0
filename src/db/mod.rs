use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::config::{StoreBackend, StoreConfig};

pub mod memory;
pub mod models;
pub mod postgres;
pub mod redis;

pub use memory::MemoryStore;
pub use models::UrlMapping;
pub use postgres::PostgresStore;
pub use self::redis::RedisStore;

/// Logical table holding every mapping, whatever the backend.
pub const TABLE_NAME: &str = "url_mappings";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Redis(#[from] ::redis::RedisError),
    #[error("connection pool: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("{0}")]
    Postgres(#[from] sqlx::Error),
    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Key-value store of URL mappings, keyed by the exact short code.
///
/// `put` overwrites unconditionally; there is no conditional insert.
#[async_trait]
pub trait MappingStore: Send + Sync {
    async fn put(&self, mapping: &UrlMapping) -> StoreResult<()>;

    async fn get(&self, short_code: &str) -> StoreResult<Option<UrlMapping>>;
}

/// Builds the long-lived store client for the configured backend.
pub async fn connect(config: &StoreConfig) -> anyhow::Result<Arc<dyn MappingStore>> {
    let store: Arc<dyn MappingStore> = match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory mapping store");
            Arc::new(MemoryStore::new())
        }
        StoreBackend::Redis => {
            info!(endpoint = %config.endpoint, "Using Redis mapping store");
            Arc::new(RedisStore::connect(&config.endpoint, config.pool_size)?)
        }
        StoreBackend::Postgres => {
            info!("Using PostgreSQL mapping store");
            let store = PostgresStore::connect(&config.endpoint, config.pool_size).await?;
            store.init().await?;
            Arc::new(store)
        }
    };
    Ok(store)
}
