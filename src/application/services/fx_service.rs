//! Exchange rate service with ECB primary and exchangerate.host fallback.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::warn;
use url::Url;

use super::Served;
use super::cache_support::{load, store};
use crate::domain::entities::FxRates;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::http::{FetchClient, FetchResult};
use crate::infrastructure::providers::{ecb, exchangerate_host};
use crate::utils::cache_keys;

/// FX providers in fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FxProvider {
    Ecb,
    ExchangerateHost,
}

const PROVIDERS: [FxProvider; 2] = [FxProvider::Ecb, FxProvider::ExchangerateHost];

pub struct FxService {
    client: FetchClient,
    cache: Arc<dyn CacheService>,
    ecb_url: Url,
    fallback_url: Url,
}

impl FxService {
    pub fn new(
        client: FetchClient,
        cache: Arc<dyn CacheService>,
        ecb_url: Url,
        fallback_url: Url,
    ) -> Self {
        Self {
            client,
            cache,
            ecb_url,
            fallback_url,
        }
    }

    /// Rates for `base`, filtered to `symbols` (empty keeps all).
    ///
    /// The cache holds every rate for the base, so one entry serves any
    /// symbol filter. Its lifetime depends on the provider that answered.
    ///
    /// # Errors
    ///
    /// When every provider fails, the primary's fetch error is reported, or
    /// [`AppError::UpstreamParsing`] if the primary answered with an
    /// unusable payload.
    pub async fn rates(&self, base: &str, symbols: &[String]) -> Result<Served<FxRates>, AppError> {
        let key = cache_keys::fx(base);

        if let Some(cached) = load::<FxRates>(self.cache.as_ref(), &key).await {
            let ttl = cached.source.ttl();
            return Ok(Served::cached(cached.retain_symbols(symbols), ttl));
        }

        let today = Utc::now().format("%Y-%m-%d").to_string();
        let mut primary_error: Option<AppError> = None;

        for provider in PROVIDERS {
            let error = match self.fetch(provider, base).await {
                Ok(fetched) => match normalize(provider, &fetched.data, base, &today) {
                    Some(fx) => {
                        let ttl = fx.source.ttl();
                        store(self.cache.as_ref(), &key, &fx, ttl).await;
                        let upstream = fx.source.label();
                        return Ok(Served::fresh(fx.retain_symbols(symbols), Some(ttl), upstream));
                    }
                    None => {
                        warn!(?provider, base, "FX payload could not be parsed");
                        AppError::parsing("Unable to parse exchange rates")
                    }
                },
                Err(e) => AppError::upstream("Unable to fetch exchange rates", &e),
            };

            if primary_error.is_none() {
                primary_error = Some(error);
            }
        }

        Err(primary_error.unwrap_or_else(|| AppError::internal("No FX provider configured")))
    }

    async fn fetch(&self, provider: FxProvider, base: &str) -> FetchResult {
        let url = match provider {
            FxProvider::Ecb => self.ecb_url.clone(),
            FxProvider::ExchangerateHost => {
                let mut url = self.fallback_url.clone();
                url.query_pairs_mut().append_pair("base", base);
                url
            }
        };
        self.client.fetch_json(url.as_str(), self.client.options()).await
    }
}

fn normalize(provider: FxProvider, data: &Value, base: &str, today: &str) -> Option<FxRates> {
    match provider {
        FxProvider::Ecb => ecb::normalize(data, base, today),
        FxProvider::ExchangerateHost => exchangerate_host::normalize(data, base, today),
    }
}
