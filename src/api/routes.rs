//! API route configuration.

use crate::api::handlers::{
    api_method_not_allowed, api_not_found, countries_handler, fx_handler, taric_link_handler,
    trade_get_handler, trade_post_handler, vies_get_handler, vies_post_handler, weather_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All `/api` routes, without middleware.
///
/// # Endpoints
///
/// - `GET        /countries`      - Country metadata
/// - `GET        /fx`             - Exchange rates (`base`, `symbols`)
/// - `GET, POST  /trade`          - Comtrade statistics
/// - `GET        /taric-link`     - TARIC consultation link (`code`)
/// - `GET, POST  /vies`           - VAT number check
/// - `GET, POST  /vies/validate`  - VAT number check (alias)
/// - `GET, POST  /vies/valider`   - VAT number check (alias)
/// - `GET        /weather`        - Current weather (`lat`+`lon` or `city`)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/countries", get(countries_handler))
        .route("/fx", get(fx_handler))
        .route("/trade", get(trade_get_handler).post(trade_post_handler))
        .route("/taric-link", get(taric_link_handler))
        .route("/vies", get(vies_get_handler).post(vies_post_handler))
        .route(
            "/vies/validate",
            get(vies_get_handler).post(vies_post_handler),
        )
        .route(
            "/vies/valider",
            get(vies_get_handler).post(vies_post_handler),
        )
        .route("/weather", get(weather_handler))
        .method_not_allowed_fallback(api_method_not_allowed)
        .fallback(api_not_found)
}
