//! Handler for the weather endpoint.

use axum::extract::State;

use crate::api::dto::weather::WeatherParams;
use crate::api::envelope::ApiResponse;
use crate::api::extract::ValidatedQuery;
use crate::domain::entities::Weather;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/weather?lat=48.85&lon=2.35` or `GET /api/weather?city=Paris`
pub async fn weather_handler(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<WeatherParams>,
) -> Result<ApiResponse<Weather>, AppError> {
    let served = state.weather_service.current(&params.into()).await?;
    Ok(served.into())
}
