//! Caching infrastructure for the service layer.
//!
//! A cache entry here is a derived, disposable JSON snapshot of a query
//! result: its absence (or corruption) only costs latency, never
//! correctness. Keys, TTL and invalidation rules are part of the service
//! contract and live in [`keys`].

pub mod keys;
mod redis;
mod store;

pub use redis::RedisCacheStore;
pub use store::{CacheExt, CacheStore, CACHE_TTL};
