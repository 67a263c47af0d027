//! Business logic services for the application layer.
//!
//! Each service owns one `/api/*` resource: cache lookup, upstream fetch
//! through [`crate::infrastructure::http::FetchClient`], normalization and
//! cache store.

mod cache_support;
pub mod countries_service;
pub mod fx_service;
pub mod taric_service;
pub mod trade_service;
pub mod vies_service;
pub mod weather_service;

pub use countries_service::CountriesService;
pub use fx_service::FxService;
pub use taric_service::TaricService;
pub use trade_service::TradeService;
pub use vies_service::ViesService;
pub use weather_service::WeatherService;

use std::time::Duration;

/// Payload plus the caching metadata a handler needs to answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Served<T> {
    pub data: T,
    /// Publicly cacheable for this long; `None` means `no-store`.
    pub max_age: Option<Duration>,
    /// Upstream that produced the payload, `None` on a cache hit.
    pub upstream: Option<&'static str>,
}

impl<T> Served<T> {
    pub fn cached(data: T, max_age: Duration) -> Self {
        Self {
            data,
            max_age: Some(max_age),
            upstream: None,
        }
    }

    pub fn fresh(data: T, max_age: Option<Duration>, upstream: &'static str) -> Self {
        Self {
            data,
            max_age,
            upstream: Some(upstream),
        }
    }
}
