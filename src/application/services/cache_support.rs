//! Typed, fail-open access to the payload cache.

use crate::infrastructure::cache::CacheService;
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, warn};

/// Reads and decodes a cached payload. Backend errors and undecodable
/// entries count as a miss.
pub(crate) async fn load<T: DeserializeOwned>(cache: &dyn CacheService, key: &str) -> Option<T> {
    let raw = match cache.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            metrics::counter!("cache_misses_total").increment(1);
            return None;
        }
        Err(e) => {
            warn!(key, "Cache read failed: {}", e);
            metrics::counter!("cache_misses_total").increment(1);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => {
            debug!(key, "Cache hit");
            metrics::counter!("cache_hits_total").increment(1);
            Some(value)
        }
        Err(e) => {
            warn!(key, "Discarding undecodable cache entry: {}", e);
            metrics::counter!("cache_misses_total").increment(1);
            None
        }
    }
}

/// Encodes and stores a payload. Failures are logged and ignored.
pub(crate) async fn store<T: Serialize>(
    cache: &dyn CacheService,
    key: &str,
    value: &T,
    ttl: Duration,
) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(key, "Failed to encode cache entry: {}", e);
            return;
        }
    };

    if let Err(e) = cache.set(key, &raw, ttl).await {
        warn!(key, "Cache write failed: {}", e);
    }
}
