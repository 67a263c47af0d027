//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`cache`] - Key-value cache (in-memory LRU and Redis implementations)
//! - [`http`] - Outbound HTTP client with timeout and retries
//! - [`providers`] - Per-upstream request building and payload normalization

pub mod cache;
pub mod http;
pub mod providers;
