//! Cache service trait and error types.

use async_trait::async_trait;
use std::time::Duration;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value store with per-entry TTL holding serialized payloads.
///
/// Implementations must be thread-safe. A failing cache should degrade to a
/// miss rather than fail the request, so callers treat `Err` like `Ok(None)`.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MemoryCache`] - bounded in-process LRU store (default)
/// - [`crate::infrastructure::cache::RedisCache`] - shared Redis store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the stored value, or `None` on a miss or once its TTL has elapsed.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a value for `ttl`. A zero TTL stores the value without expiry.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    /// Removes a value. Removing a missing key is not an error.
    async fn del(&self, key: &str) -> CacheResult<()>;

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short backend name for logs and the health endpoint.
    fn backend(&self) -> &'static str;
}
