//! Domain layer: normalized payloads and request admission.
//!
//! # Architecture
//!
//! - [`entities`] - Stable response shapes, independent of upstream schemas
//! - [`rate_limiter`] - Per-client fixed-window token bucket
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers; upstream integrations live in [`crate::infrastructure`] and the
//! orchestration in [`crate::application::services`].

pub mod entities;
pub mod rate_limiter;

pub use rate_limiter::{RateLimitConfig, RateLimitDecision, RateLimiter};
