//! Per-client, per-route rate limiting.
//!
//! Runs as a route layer, before any extractor, so an exhausted quota
//! answers 429 even for requests that would fail validation.

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Rejects the request with `RATE_LIMITED` once the caller's bucket for
/// this route is empty.
///
/// The bucket key is `<route>:<client-ip>`, where `<route>` is the first
/// path segment under `/api`, so `/api/vies` and `/api/vies/validate` share
/// one quota.
///
/// # Example
///
/// ```rust,ignore
/// let api = Router::new()
///     .route("/fx", get(fx_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit::layer));
/// ```
pub async fn layer(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let key = format!("{}:{}", route_name(&path), client_ip(&req, state.behind_proxy));
    let decision = state.rate_limiter.check(&key);

    if !decision.allowed {
        let retry_after_secs = decision.retry_after_seconds.unwrap_or(1);
        tracing::debug!(key, retry_after_secs, "Rate limit exceeded");
        return AppError::RateLimited { retry_after_secs }.into_response();
    }

    next.run(req).await
}

/// First segment after `/api/`, e.g. `vies` for `/api/vies/validate`.
fn route_name(path: &str) -> &str {
    let trimmed = path.trim_start_matches('/');
    let rest = trimmed.strip_prefix("api/").unwrap_or(trimmed);
    rest.split('/').next().filter(|s| !s.is_empty()).unwrap_or("root")
}
