//! HTTP request handlers for API endpoints.
//!
//! Handlers only extract and validate input, call one service and wrap the
//! result in the response envelope. Rate limiting happens earlier, in
//! [`crate::api::middleware::rate_limit`].

pub mod countries;
pub mod fx;
pub mod health;
pub mod taric;
pub mod trade;
pub mod vies;
pub mod weather;

pub use countries::countries_handler;
pub use fx::fx_handler;
pub use health::health_handler;
pub use taric::taric_link_handler;
pub use trade::{trade_get_handler, trade_post_handler};
pub use vies::{vies_get_handler, vies_post_handler};
pub use weather::weather_handler;

use axum::http::StatusCode;
use axum::response::Response;

use crate::api::envelope::failure;

/// Enveloped 404 for unknown `/api/*` paths.
pub async fn api_not_found() -> Response {
    failure("Route not found", "NOT_FOUND", StatusCode::NOT_FOUND, None)
}

/// Enveloped 405 for known paths hit with the wrong method.
pub async fn api_method_not_allowed() -> Response {
    failure(
        "Method not allowed",
        "METHOD_NOT_ALLOWED",
        StatusCode::METHOD_NOT_ALLOWED,
        None,
    )
}
