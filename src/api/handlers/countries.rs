//! Handler for the country metadata endpoint.

use axum::extract::State;

use crate::api::envelope::ApiResponse;
use crate::domain::entities::Country;
use crate::error::AppError;
use crate::state::AppState;

/// Lists countries with region, capital, languages, currencies and VAT rate.
///
/// # Endpoint
///
/// `GET /api/countries`
///
/// # Response
///
/// ```json
/// {
///   "ok": true,
///   "status": 200,
///   "data": [
///     {
///       "code": "FR",
///       "name": "France",
///       "region": "Europe",
///       "capital": "Paris",
///       "languages": ["French"],
///       "currencies": [{ "code": "EUR", "name": "Euro", "symbol": "€" }],
///       "vat": 20.0
///     }
///   ]
/// }
/// ```
pub async fn countries_handler(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Country>>, AppError> {
    let served = state.countries_service.list().await?;
    Ok(served.into())
}
