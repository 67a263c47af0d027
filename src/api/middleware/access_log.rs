//! One structured log line per API request.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::api::envelope::{ErrorCode, UpstreamTag};

/// Logs method, path, status, latency, error code and upstream label.
///
/// `code` and `upstream` are read from response extensions set by the
/// envelope, so they are empty for successful cache hits.
///
/// # Example Log
///
/// ```text
/// INFO api request method=GET path=/api/fx status=200 ms=143 code="" upstream="ECB"
/// ```
pub async fn layer(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();
    let code = response
        .extensions()
        .get::<ErrorCode>()
        .map(|c| c.0.as_str())
        .unwrap_or_default();
    let upstream = response
        .extensions()
        .get::<UpstreamTag>()
        .map(|u| u.0)
        .unwrap_or_default();

    if response.status().is_server_error() {
        tracing::warn!(%method, path, status, ms, code, upstream, "api request");
    } else {
        tracing::info!(%method, path, status, ms, code, upstream, "api request");
    }

    response
}
