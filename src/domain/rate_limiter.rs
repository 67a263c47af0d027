//! Fixed-window token bucket rate limiter.
//!
//! Each key (route name + client IP) owns a bucket of `capacity` tokens that
//! is refilled in full once its window has elapsed. This is not a sliding
//! window: a client can spend a full bucket just before the reset and another
//! one right after it, so up to 2× capacity may pass around a boundary.
//!
//! Buckets are never pruned; the map grows with the number of distinct keys
//! seen since startup.

use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

/// Limiter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub capacity: u32,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            capacity: 60,
            window: Duration::from_secs(60),
        }
    }
}

/// Outcome of a single [`RateLimiter::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Tokens left in the current window after this call.
    pub remaining: u32,
    /// Whole seconds until the window resets; set only when denied.
    pub retry_after_seconds: Option<u64>,
}

#[derive(Debug, Clone, Copy)]
struct RateBucket {
    tokens: u32,
    reset_at: Instant,
}

/// Process-wide limiter shared by all routes.
#[derive(Debug)]
pub struct RateLimiter {
    buckets: DashMap<String, RateBucket>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            buckets: DashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Consumes one token from `key`'s bucket if any is left.
    pub fn check(&self, key: &str) -> RateLimitDecision {
        let now = Instant::now();
        let RateLimitConfig { capacity, window } = self.config;

        let mut bucket = self
            .buckets
            .entry(key.to_string())
            .or_insert_with(|| RateBucket {
                tokens: capacity,
                reset_at: now + window,
            });

        if now > bucket.reset_at {
            bucket.tokens = capacity;
            bucket.reset_at = now + window;
        }

        if bucket.tokens == 0 {
            let remaining_ms = bucket.reset_at.saturating_duration_since(now).as_millis();
            let retry_after = (remaining_ms.div_ceil(1000) as u64).max(1);
            metrics::counter!("rate_limited_total").increment(1);
            return RateLimitDecision {
                allowed: false,
                remaining: 0,
                retry_after_seconds: Some(retry_after),
            };
        }

        bucket.tokens -= 1;
        RateLimitDecision {
            allowed: true,
            remaining: bucket.tokens,
            retry_after_seconds: None,
        }
    }

    /// Number of keys with a bucket.
    pub fn tracked_keys(&self) -> usize {
        self.buckets.len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(capacity: u32, window_secs: u64) -> RateLimiter {
        RateLimiter::new(RateLimitConfig {
            capacity,
            window: Duration::from_secs(window_secs),
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_exactly_capacity_requests_pass() {
        let limiter = limiter(3, 60);

        for expected_remaining in [2, 1, 0] {
            let decision = limiter.check("fx:1.1.1.1");
            assert!(decision.allowed);
            assert_eq!(decision.remaining, expected_remaining);
        }

        let denied = limiter.check("fx:1.1.1.1");
        assert!(!denied.allowed);
        assert_eq!(denied.retry_after_seconds, Some(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_after_tracks_remaining_window() {
        let limiter = limiter(1, 60);
        assert!(limiter.check("k").allowed);

        tokio::time::advance(Duration::from_millis(20_500)).await;
        let denied = limiter.check("k");
        assert!(!denied.allowed);
        // 39.5s left, rounded up.
        assert_eq!(denied.retry_after_seconds, Some(40));
    }

    #[tokio::test(start_paused = true)]
    async fn test_bucket_refills_after_window() {
        let limiter = limiter(2, 10);
        assert!(limiter.check("k").allowed);
        assert!(limiter.check("k").allowed);
        assert!(!limiter.check("k").allowed);

        // Reset happens strictly after the window.
        tokio::time::advance(Duration::from_secs(10)).await;
        assert!(!limiter.check("k").allowed);

        tokio::time::advance(Duration::from_millis(1)).await;
        let decision = limiter.check("k");
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_are_independent() {
        let limiter = limiter(1, 60);
        assert!(limiter.check("fx:1.1.1.1").allowed);
        assert!(!limiter.check("fx:1.1.1.1").allowed);

        assert!(limiter.check("fx:2.2.2.2").allowed);
        assert!(limiter.check("trade:1.1.1.1").allowed);
        assert_eq!(limiter.tracked_keys(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_boundary_admits_more_than_capacity() {
        let limiter = limiter(4, 10);
        // Opens the window at t=0.
        assert!(limiter.check("k").allowed);

        // Burst of three just before the reset, four right after it:
        // seven requests inside 200ms against a capacity of four.
        tokio::time::advance(Duration::from_millis(9_900)).await;
        let before = (0..3).filter(|_| limiter.check("k").allowed).count();

        tokio::time::advance(Duration::from_millis(200)).await;
        let after = (0..5).filter(|_| limiter.check("k").allowed).count();

        assert_eq!(before, 3);
        assert_eq!(after, 4);
    }
}
