//! Handlers for VIES VAT number validation.
//!
//! Served on both `/api/vies` and `/api/vies/validate`. Results are never
//! cacheable.

use axum::extract::State;

use crate::api::dto::vies::VatParams;
use crate::api::envelope::ApiResponse;
use crate::api::extract::{ValidatedJson, ValidatedQuery};
use crate::application::services::vies_service::UPSTREAM;
use crate::domain::entities::VatCheck;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/vies/validate?vat=FR40303265045`
pub async fn vies_get_handler(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<VatParams>,
) -> Result<ApiResponse<VatCheck>, AppError> {
    check(&state, params).await
}

/// `POST /api/vies/validate` with `{ "vat": ..., "traderName": ..., "traderAddress": ... }`
pub async fn vies_post_handler(
    State(state): State<AppState>,
    ValidatedJson(params): ValidatedJson<VatParams>,
) -> Result<ApiResponse<VatCheck>, AppError> {
    check(&state, params).await
}

async fn check(state: &AppState, params: VatParams) -> Result<ApiResponse<VatCheck>, AppError> {
    let result = state.vies_service.check(&params.into()).await?;
    Ok(ApiResponse::ok(result).upstream(Some(UPSTREAM)))
}
