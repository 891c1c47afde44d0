//! Cache store trait for abstracted caching operations.

use palaver_core::PalaverResult;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// TTL applied to every cache entry in this system.
///
/// Fixed by contract, not configurable per call: staleness anywhere in the
/// read path is bounded by this single number.
pub const CACHE_TTL: Duration = Duration::from_secs(300);

/// Cache store abstraction.
///
/// Provides raw string get/set/delete over a key space with per-key
/// expiration. Uses JSON strings for type-erased storage so the trait stays
/// dyn-compatible; typed access goes through [`CacheExt`].
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> PalaverResult<Option<String>>;

    /// Set a raw JSON value in the cache with a TTL.
    ///
    /// Overwrites unconditionally and resets the TTL. The write is atomic
    /// at the key level; readers never observe a partial value.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> PalaverResult<()>;

    /// Delete a value from the cache. Idempotent: deleting an absent key
    /// succeeds and returns `false`.
    async fn delete(&self, key: &str) -> PalaverResult<bool>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Extension trait with typed methods for convenience.
#[async_trait]
pub trait CacheExt: CacheStore {
    /// Get a typed value from the cache.
    ///
    /// A payload that fails to deserialize is treated as a miss, not an
    /// error: a corrupt cache entry must fall back to the source of truth.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> PalaverResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => match serde_json::from_str(&json) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    debug!("Discarding unreadable cache entry '{}': {}", key, e);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> PalaverResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }
}

// Blanket implementation for all CacheStore implementations
impl<T: CacheStore + ?Sized> CacheExt for T {}
