//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`  - Health check: cache backend, rate limiter (not enveloped)
//! - `/api/*`        - Enveloped data routes, see [`crate::api::routes`]
//!
//! # Middleware
//!
//! - **Tracing** - Request spans named by route template
//! - **Access log** - One structured line per `/api` request
//! - **Rate limiting** - Per-route, per-client fixed window on matched `/api` routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{access_log, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with every route and middleware, minus path
/// normalization. Used directly by integration tests.
pub fn router(state: AppState) -> Router {
    let api_router = api::routes::api_routes()
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::layer,
        ))
        .layer(middleware::from_fn(access_log::layer));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application service: [`router`] behind trailing-slash
/// normalization.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
