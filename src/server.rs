//! HTTP server initialization and runtime setup.
//!
//! Handles cache selection, outbound client setup and the Axum server lifecycle.

use crate::config::Config;
use crate::domain::RateLimiter;
use crate::infrastructure::cache::{CacheService, MemoryCache, RedisCache};
use crate::infrastructure::http::FetchClient;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;

/// Redis connection attempts after the first one.
const REDIS_CONNECT_RETRIES: usize = 2;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Outbound fetch client
/// - Redis cache (or in-memory fallback)
/// - Per-client rate limiter
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The fetch client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let client =
        FetchClient::new(config.fetch_defaults()).context("Failed to build HTTP client")?;

    let cache = build_cache(&config).await;
    let rate_limiter = Arc::new(RateLimiter::new(config.rate_limit()));

    let state = AppState::new(
        client,
        cache,
        rate_limiter,
        &config.upstreams,
        config.behind_proxy,
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Redis when configured and reachable, the bounded in-memory store otherwise.
async fn build_cache(config: &Config) -> Arc<dyn CacheService> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Cache: in-memory ({} entries)", config.cache_max_entries);
        return Arc::new(MemoryCache::new(config.cache_max_entries));
    };

    let strategy = FixedInterval::from_millis(500).take(REDIS_CONNECT_RETRIES);
    match Retry::spawn(strategy, || RedisCache::connect(redis_url)).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to connect to Redis: {}. Using in-memory cache.",
                e
            );
            Arc::new(MemoryCache::new(config.cache_max_entries))
        }
    }
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
