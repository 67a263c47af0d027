#![allow(dead_code)]

use axum_test::TestServer;
use std::sync::Arc;
use std::time::Duration;
use trade_data_api::config::UpstreamConfig;
use trade_data_api::domain::{RateLimitConfig, RateLimiter};
use trade_data_api::infrastructure::cache::{CacheService, MemoryCache};
use trade_data_api::infrastructure::http::{FetchClient, FetchDefaults};
use trade_data_api::routes::router;
use trade_data_api::state::AppState;
use url::Url;
use wiremock::MockServer;

pub const PRIMARY_KEY: &str = "primary-key";
pub const SECONDARY_KEY: &str = "secondary-key";

/// Every upstream points at a path on the mock server.
pub fn upstreams(server: &MockServer) -> UpstreamConfig {
    let url = |path: &str| Url::parse(&format!("{}{}", server.uri(), path)).unwrap();

    UpstreamConfig {
        ecb_url: url("/ecb"),
        exchangerate_host_url: url("/fx-fallback"),
        restcountries_url: url("/countries"),
        openmeteo_url: url("/forecast"),
        taric_url: url("/taric?Lang=en"),
        vies_url: url("/vies"),
        comtrade_url: url("/comtrade"),
        comtrade_primary_key: Some(PRIMARY_KEY.to_string()),
        comtrade_secondary_key: Some(SECONDARY_KEY.to_string()),
    }
}

/// Fast-failing client: short timeout, no retries.
pub fn fetch_client() -> FetchClient {
    FetchClient::new(FetchDefaults {
        timeout: Duration::from_secs(2),
        retries: 0,
        retry_delay: Duration::from_millis(10),
        user_agent: "trade-data-api-tests".to_string(),
    })
    .unwrap()
}

pub fn create_test_state_with(
    upstreams: &UpstreamConfig,
    cache: Arc<dyn CacheService>,
    rate_limit_capacity: u32,
) -> AppState {
    let rate_limiter = Arc::new(RateLimiter::new(RateLimitConfig {
        capacity: rate_limit_capacity,
        window: Duration::from_secs(60),
    }));

    AppState::new(fetch_client(), cache, rate_limiter, upstreams, true)
}

pub fn create_test_state(server: &MockServer) -> AppState {
    create_test_state_with(&upstreams(server), Arc::new(MemoryCache::new(100)), 1_000)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}
