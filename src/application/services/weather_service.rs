//! Current weather service backed by Open-Meteo.

use std::sync::Arc;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use url::Url;

use super::Served;
use super::cache_support::{load, store};
use crate::domain::entities::Weather;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::http::FetchClient;
use crate::infrastructure::providers::open_meteo::{self, WeatherQuery};
use crate::utils::cache_keys;

pub const WEATHER_TTL: Duration = Duration::from_secs(30 * 60);

const UPSTREAM: &str = "OPEN_METEO";

pub struct WeatherService {
    client: FetchClient,
    cache: Arc<dyn CacheService>,
    url: Url,
}

impl WeatherService {
    pub fn new(client: FetchClient, cache: Arc<dyn CacheService>, url: Url) -> Self {
        Self { client, cache, url }
    }

    pub async fn current(&self, query: &WeatherQuery) -> Result<Served<Weather>, AppError> {
        let key = cache_keys::weather(&query.key_suffix());

        if let Some(weather) = load(self.cache.as_ref(), &key).await {
            return Ok(Served::cached(weather, WEATHER_TTL));
        }

        let url = open_meteo::request_url(&self.url, query);
        let fetched = self
            .client
            .fetch_json(url.as_str(), self.client.options())
            .await
            .map_err(|e| AppError::upstream("Unable to fetch weather", &e))?;

        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let weather = open_meteo::normalize(&fetched.data, &now);
        store(self.cache.as_ref(), &key, &weather, WEATHER_TTL).await;

        Ok(Served::fresh(weather, Some(WEATHER_TTL), UPSTREAM))
    }
}
