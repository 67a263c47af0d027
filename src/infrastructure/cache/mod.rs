//! Key-value cache for normalized upstream payloads.
//!
//! Provides a [`CacheService`] trait with two implementations:
//! - [`MemoryCache`] - Bounded in-process LRU store with TTL (default)
//! - [`RedisCache`] - Shared Redis store, selected when Redis is configured

mod memory_cache;
mod redis_cache;
mod service;

pub use memory_cache::{DEFAULT_MAX_ENTRIES, MemoryCache};
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};

#[cfg(test)]
pub use service::MockCacheService;
