//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{
    CountriesService, FxService, TaricService, TradeService, ViesService, WeatherService,
    trade_service::ComtradeCredential,
};
use crate::config::UpstreamConfig;
use crate::domain::RateLimiter;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::http::FetchClient;

#[derive(Clone)]
pub struct AppState {
    pub countries_service: Arc<CountriesService>,
    pub fx_service: Arc<FxService>,
    pub trade_service: Arc<TradeService>,
    pub taric_service: Arc<TaricService>,
    pub vies_service: Arc<ViesService>,
    pub weather_service: Arc<WeatherService>,
    pub cache: Arc<dyn CacheService>,
    pub rate_limiter: Arc<RateLimiter>,
    /// Trust forwarding headers for client identity.
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires every service onto one fetch client and one cache.
    pub fn new(
        client: FetchClient,
        cache: Arc<dyn CacheService>,
        rate_limiter: Arc<RateLimiter>,
        upstreams: &UpstreamConfig,
        behind_proxy: bool,
    ) -> Self {
        let credentials = ComtradeCredential::ordered(
            upstreams.comtrade_primary_key.clone(),
            upstreams.comtrade_secondary_key.clone(),
        );

        Self {
            countries_service: Arc::new(CountriesService::new(
                client.clone(),
                cache.clone(),
                upstreams.restcountries_url.clone(),
            )),
            fx_service: Arc::new(FxService::new(
                client.clone(),
                cache.clone(),
                upstreams.ecb_url.clone(),
                upstreams.exchangerate_host_url.clone(),
            )),
            trade_service: Arc::new(TradeService::new(
                client.clone(),
                cache.clone(),
                upstreams.comtrade_url.clone(),
                credentials,
            )),
            taric_service: Arc::new(TaricService::new(
                client.clone(),
                cache.clone(),
                upstreams.taric_url.to_string(),
            )),
            vies_service: Arc::new(ViesService::new(client.clone(), upstreams.vies_url.clone())),
            weather_service: Arc::new(WeatherService::new(
                client,
                cache.clone(),
                upstreams.openmeteo_url.clone(),
            )),
            cache,
            rate_limiter,
            behind_proxy,
        }
    }
}
