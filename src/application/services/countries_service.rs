//! Country metadata service.

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use super::Served;
use super::cache_support::{load, store};
use crate::domain::entities::Country;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::http::FetchClient;
use crate::infrastructure::providers::rest_countries;
use crate::utils::cache_keys;

/// Country metadata changes rarely.
pub const COUNTRIES_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

const UPSTREAM: &str = "REST_COUNTRIES";

pub struct CountriesService {
    client: FetchClient,
    cache: Arc<dyn CacheService>,
    url: Url,
}

impl CountriesService {
    pub fn new(client: FetchClient, cache: Arc<dyn CacheService>, url: Url) -> Self {
        Self { client, cache, url }
    }

    /// Lists every country, served from cache for [`COUNTRIES_TTL`].
    pub async fn list(&self) -> Result<Served<Vec<Country>>, AppError> {
        if let Some(countries) = load(self.cache.as_ref(), cache_keys::COUNTRIES_ALL).await {
            return Ok(Served::cached(countries, COUNTRIES_TTL));
        }

        let fetched = self
            .client
            .fetch_json(self.url.as_str(), self.client.options())
            .await
            .map_err(|e| AppError::upstream("Unable to fetch countries", &e))?;

        let countries = rest_countries::normalize(&fetched.data);
        store(
            self.cache.as_ref(),
            cache_keys::COUNTRIES_ALL,
            &countries,
            COUNTRIES_TTL,
        )
        .await;

        Ok(Served::fresh(countries, Some(COUNTRIES_TTL), UPSTREAM))
    }
}
