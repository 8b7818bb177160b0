use async_trait::async_trait;
use r2d2::Pool;
use redis::{Client, Commands};
use tracing::debug;

use super::{MappingStore, StoreResult, UrlMapping, TABLE_NAME};

pub type RedisPool = Pool<Client>;

/// Mappings stored as plain string keys `url_mappings:<short_code>`.
#[derive(Debug, Clone)]
pub struct RedisStore {
    pool: RedisPool,
}

impl RedisStore {
    pub fn connect(redis_url: &str, pool_size: u32) -> StoreResult<Self> {
        let client = Client::open(redis_url)?;
        let pool = Pool::builder().max_size(pool_size).build(client)?;
        Ok(Self::new(pool))
    }

    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

fn key(short_code: &str) -> String {
    format!("{}:{}", TABLE_NAME, short_code)
}

// The r2d2 connections are blocking, so every call hops onto the blocking pool.
#[async_trait]
impl MappingStore for RedisStore {
    async fn put(&self, mapping: &UrlMapping) -> StoreResult<()> {
        let pool = self.pool.clone();
        let key = key(&mapping.short_code);
        let long_url = mapping.long_url.clone();

        tokio::task::spawn_blocking(move || -> StoreResult<()> {
            let mut conn = pool.get()?;
            conn.set::<_, _, ()>(&key, long_url)?;
            debug!(key = %key, "SET");
            Ok(())
        })
        .await?
    }

    async fn get(&self, short_code: &str) -> StoreResult<Option<UrlMapping>> {
        let pool = self.pool.clone();
        let short_code = short_code.to_string();

        tokio::task::spawn_blocking(move || -> StoreResult<Option<UrlMapping>> {
            let mut conn = pool.get()?;
            let long_url = conn.get::<_, Option<String>>(key(&short_code))?;
            debug!(short_code = %short_code, hit = long_url.is_some(), "GET");
            Ok(long_url.map(|long_url| UrlMapping {
                short_code,
                long_url,
            }))
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced_by_table() {
        assert_eq!(key("abc123"), "url_mappings:abc123");
    }

    #[test]
    fn rejects_malformed_url() {
        assert!(RedisStore::connect("not a redis url", 1).is_err());
    }
}
