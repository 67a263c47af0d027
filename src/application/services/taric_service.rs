//! TARIC consultation link service.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use super::Served;
use super::cache_support::{load, store};
use crate::domain::entities::TaricLink;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::http::{FetchClient, ResponseFormat};
use crate::utils::cache_keys;

pub const TARIC_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

const UPSTREAM: &str = "TARIC";

pub struct TaricService {
    client: FetchClient,
    cache: Arc<dyn CacheService>,
    base_url: String,
}

impl TaricService {
    pub fn new(client: FetchClient, cache: Arc<dyn CacheService>, base_url: String) -> Self {
        Self {
            client,
            cache,
            base_url,
        }
    }

    /// Link for a validated commodity code.
    ///
    /// A fresh link is probed once. Only a reachable link is cached; an
    /// unreachable one is still returned, with `no-store`.
    pub async fn link(&self, code: &str) -> Served<TaricLink> {
        let key = cache_keys::taric(code);

        if let Some(link) = load(self.cache.as_ref(), &key).await {
            return Served::cached(link, TARIC_TTL);
        }

        let link = TaricLink::build(&self.base_url, code);

        if self.probe(&link.link).await {
            store(self.cache.as_ref(), &key, &link, TARIC_TTL).await;
            Served::fresh(link, Some(TARIC_TTL), UPSTREAM)
        } else {
            Served::fresh(link, None, UPSTREAM)
        }
    }

    async fn probe(&self, link: &str) -> bool {
        let options = self
            .client
            .options()
            .retries(0)
            .format(ResponseFormat::Text);

        match self.client.fetch_json(link, options).await {
            Ok(_) => true,
            Err(e) => {
                warn!(link, code = %e.code(), "TARIC link probe failed");
                false
            }
        }
    }
}
