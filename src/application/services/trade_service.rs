//! UN Comtrade trade statistics service.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, Utc};
use tracing::{info, warn};
use url::Url;

use super::Served;
use super::cache_support::{load, store};
use crate::domain::entities::TradeSummary;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::http::{FetchClient, FetchError};
use crate::infrastructure::providers::comtrade::{self, TradeQuery};
use crate::utils::cache_keys;

/// Figures for the running year are still being revised.
pub const RECENT_PERIOD_TTL: Duration = Duration::from_secs(6 * 60 * 60);
/// Past years are settled.
pub const SETTLED_PERIOD_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// One Comtrade subscription key, tried in order.
#[derive(Debug, Clone)]
pub struct ComtradeCredential {
    pub label: &'static str,
    pub key: String,
}

impl ComtradeCredential {
    /// Primary then secondary, skipping unset keys.
    pub fn ordered(primary: Option<String>, secondary: Option<String>) -> Vec<Self> {
        [("COMTRADE_PRIMARY", primary), ("COMTRADE_SECONDARY", secondary)]
            .into_iter()
            .filter_map(|(label, key)| {
                key.filter(|k| !k.trim().is_empty())
                    .map(|key| Self { label, key })
            })
            .collect()
    }
}

pub struct TradeService {
    client: FetchClient,
    cache: Arc<dyn CacheService>,
    url: Url,
    credentials: Vec<ComtradeCredential>,
}

impl TradeService {
    pub fn new(
        client: FetchClient,
        cache: Arc<dyn CacheService>,
        url: Url,
        credentials: Vec<ComtradeCredential>,
    ) -> Self {
        Self {
            client,
            cache,
            url,
            credentials,
        }
    }

    /// Trade statistics for a validated query.
    ///
    /// # Errors
    ///
    /// - [`AppError::Config`] when no Comtrade key is configured
    /// - [`AppError::ExternalApiDown`] when the last attempt hit a network error
    /// - [`AppError::Upstream`] for any other upstream failure
    pub async fn summary(&self, query: &TradeQuery) -> Result<Served<TradeSummary>, AppError> {
        let key = cache_keys::trade(query);
        let ttl = ttl_for_year(query.year(), Utc::now().year());

        if let Some(summary) = load(self.cache.as_ref(), &key).await {
            return Ok(Served::cached(summary, ttl));
        }

        if self.credentials.is_empty() {
            return Err(AppError::config("Comtrade API key is not configured"));
        }

        let url = comtrade::request_url(&self.url, query);
        let mut last_error: Option<FetchError> = None;

        for (i, credential) in self.credentials.iter().enumerate() {
            let options = self
                .client
                .options()
                .header(comtrade::KEY_HEADER, &credential.key);

            match self.client.fetch_json(url.as_str(), options).await {
                Ok(fetched) => {
                    let summary = comtrade::normalize(&fetched.data);
                    store(self.cache.as_ref(), &key, &summary, ttl).await;
                    return Ok(Served::fresh(summary, Some(ttl), credential.label));
                }
                Err(e) => {
                    let has_next = i + 1 < self.credentials.len();
                    if has_next && falls_through(&e) {
                        info!(
                            credential = credential.label,
                            code = %e.code(),
                            "Comtrade request failed, trying next credential"
                        );
                        last_error = Some(e);
                        continue;
                    }
                    last_error = Some(e);
                    break;
                }
            }
        }

        match last_error {
            Some(e) if e.is_network() => {
                warn!("Comtrade unreachable: {}", e);
                Err(AppError::external_api_down("Comtrade service unavailable", None))
            }
            Some(e) => Err(AppError::upstream("Unable to fetch trade data", &e)),
            None => Err(AppError::internal("No Comtrade attempt was made")),
        }
    }
}

/// Failures another credential might get past: auth, quota, server side.
fn falls_through(err: &FetchError) -> bool {
    match err {
        FetchError::Network { .. } => true,
        FetchError::Http { status, .. } => *status == 401 || *status == 429 || *status >= 500,
        FetchError::Timeout { .. } => false,
    }
}

/// Shorter lifetime while the period's figures are still moving.
fn ttl_for_year(year: Option<i32>, current_year: i32) -> Duration {
    match year {
        Some(year) if year < current_year => SETTLED_PERIOD_TTL,
        _ => RECENT_PERIOD_TTL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn http(status: u16) -> FetchError {
        FetchError::Http {
            status,
            message: String::new(),
            details: Value::Null,
            retry_after: None,
        }
    }

    #[test]
    fn test_ttl_for_year() {
        assert_eq!(ttl_for_year(Some(2020), 2026), SETTLED_PERIOD_TTL);
        assert_eq!(ttl_for_year(Some(2026), 2026), RECENT_PERIOD_TTL);
        assert_eq!(ttl_for_year(Some(2030), 2026), RECENT_PERIOD_TTL);
        assert_eq!(ttl_for_year(None, 2026), RECENT_PERIOD_TTL);
    }

    #[test]
    fn test_falls_through() {
        assert!(falls_through(&http(401)));
        assert!(falls_through(&http(429)));
        assert!(falls_through(&http(503)));
        assert!(falls_through(&FetchError::Network { message: "refused".into() }));

        assert!(!falls_through(&http(400)));
        assert!(!falls_through(&http(404)));
        assert!(!falls_through(&FetchError::Timeout { timeout_ms: 1 }));
    }

    #[test]
    fn test_ordered_credentials_skip_missing() {
        let creds = ComtradeCredential::ordered(None, Some("k2".into()));
        assert_eq!(creds.len(), 1);
        assert_eq!(creds[0].label, "COMTRADE_SECONDARY");

        let both = ComtradeCredential::ordered(Some("k1".into()), Some("k2".into()));
        assert_eq!(both[0].label, "COMTRADE_PRIMARY");

        assert!(ComtradeCredential::ordered(Some("  ".into()), None).is_empty());
    }
}
