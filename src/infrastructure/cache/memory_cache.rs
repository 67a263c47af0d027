//! Bounded in-process cache with TTL and least-recently-used displacement.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Default maximum number of entries.
pub const DEFAULT_MAX_ENTRIES: usize = 500;

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// In-memory cache used when no shared store is configured.
///
/// Expired entries are never returned; they are removed lazily on read or
/// when the store needs room. Time comes from [`tokio::time::Instant`], so
/// tests can drive expiry with a paused clock.
pub struct MemoryCache {
    store: Mutex<LruCache<String, Entry>>,
}

impl MemoryCache {
    /// Creates a cache holding at most `max_entries` values.
    pub fn new(max_entries: usize) -> Self {
        debug!("Using MemoryCache (max {} entries)", max_entries);
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            store: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Number of physically stored entries, including not-yet-purged expired ones.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, Entry>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

/// Drops every expired entry so displacement only hits live ones.
fn purge_expired(store: &mut LruCache<String, Entry>, now: Instant) {
    let expired: Vec<String> = store
        .iter()
        .filter(|(_, entry)| entry.is_expired(now))
        .map(|(key, _)| key.clone())
        .collect();
    for key in expired {
        store.pop(&key);
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let now = Instant::now();
        let mut store = self.lock();

        match store.get(key) {
            None => return Ok(None),
            Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
            Some(_) => {}
        }

        debug!("Cache EXPIRED: {}", key);
        store.pop(key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let now = Instant::now();
        let mut store = self.lock();

        if !store.contains(key) && store.len() >= store.cap().get() {
            purge_expired(&mut store, now);
        }

        let entry = Entry {
            value: value.to_string(),
            expires_at: (!ttl.is_zero()).then(|| now + ttl),
        };
        if let Some((evicted, _)) = store.push(key.to_string(), entry)
            && evicted != key
        {
            debug!("Cache EVICT (LRU): {}", evicted);
        }
        Ok(())
    }

    async fn del(&self, key: &str) -> CacheResult<()> {
        self.lock().pop(key);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
