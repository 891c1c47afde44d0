//! Redis-based cache implementation.

use super::store::CacheStore;
use palaver_core::{PalaverError, PalaverResult};
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Redis-backed cache store.
pub struct RedisCacheStore {
    /// Redis connection pool; `None` disables caching entirely.
    pool: Option<Arc<Pool>>,
}

impl RedisCacheStore {
    /// Creates a new Redis cache store.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Creates a no-op cache store (for when Redis is disabled).
    ///
    /// Every read misses and every write succeeds silently, so the service
    /// degrades to reading through to the database on each request.
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> PalaverResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool
                .get()
                .await
                .map_err(|e| PalaverError::Cache(format!("Failed to get Redis connection: {}", e))),
            None => Err(PalaverError::Cache("Cache is disabled".to_string())),
        }
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> PalaverResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| PalaverError::Cache(format!("Failed to get key '{}': {}", key, e)))?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> PalaverResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| PalaverError::Cache(format!("Failed to set key '{}': {}", key, e)))?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> PalaverResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| PalaverError::Cache(format!("Failed to delete key '{}': {}", key, e)))?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::store::CACHE_TTL;

    #[tokio::test]
    async fn test_disabled_cache_misses_and_accepts_writes() {
        let cache = RedisCacheStore::disabled();
        assert!(!cache.is_enabled());

        assert!(cache.get_raw("contacts:any").await.unwrap().is_none());
        assert!(cache.set_raw("contacts:any", "[]", CACHE_TTL).await.is_ok());
        assert!(!cache.delete("contacts:any").await.unwrap());
    }
}
