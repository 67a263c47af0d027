//! Handlers for the trade statistics endpoint.

use axum::extract::State;

use crate::api::dto::trade::TradeParams;
use crate::api::envelope::ApiResponse;
use crate::api::extract::{ValidatedJson, ValidatedQuery};
use crate::domain::entities::TradeSummary;
use crate::error::AppError;
use crate::infrastructure::providers::comtrade::TradeQuery;
use crate::state::AppState;

/// `GET /api/trade?hs=850760&reporter=251&flow=export&period=2023`
pub async fn trade_get_handler(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<TradeParams>,
) -> Result<ApiResponse<TradeSummary>, AppError> {
    serve(&state, params.into()).await
}

/// `POST /api/trade` with the same parameters as a JSON body.
pub async fn trade_post_handler(
    State(state): State<AppState>,
    ValidatedJson(params): ValidatedJson<TradeParams>,
) -> Result<ApiResponse<TradeSummary>, AppError> {
    serve(&state, params.into()).await
}

async fn serve(state: &AppState, query: TradeQuery) -> Result<ApiResponse<TradeSummary>, AppError> {
    let served = state.trade_service.summary(&query).await?;
    Ok(served.into())
}
