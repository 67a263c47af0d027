//! Outbound HTTP layer shared by every upstream integration.
//!
//! [`FetchClient`] wraps `reqwest` with a per-attempt timeout, linear-backoff
//! retries for transient failures and a normalized [`FetchResult`].

mod client;
mod error;

pub use client::{
    DEFAULT_RETRIES, DEFAULT_RETRY_DELAY, DEFAULT_TIMEOUT, FetchClient, FetchDefaults,
    FetchOptions, RETRY_STATUS, ResponseFormat,
};
pub use error::{FetchError, FetchResult, Fetched};
