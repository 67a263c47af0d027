//! Handler for the exchange rate endpoint.

use axum::extract::State;

use crate::api::dto::fx::FxParams;
use crate::api::envelope::ApiResponse;
use crate::api::extract::ValidatedQuery;
use crate::domain::entities::FxRates;
use crate::error::AppError;
use crate::state::AppState;

/// Returns reference rates for a base currency.
///
/// # Endpoint
///
/// `GET /api/fx?base=EUR&symbols=USD,GBP`
///
/// # Caching
///
/// ECB data is cacheable for 24 hours, fallback data for 1 hour. The
/// `source` field tells which provider answered.
pub async fn fx_handler(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<FxParams>,
) -> Result<ApiResponse<FxRates>, AppError> {
    let symbols = params.symbol_list();
    let served = state.fx_service.rates(&params.base, &symbols).await?;
    Ok(served.into())
}
