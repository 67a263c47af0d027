//! Handler for the TARIC link endpoint.

use axum::extract::State;

use crate::api::dto::taric::TaricParams;
use crate::api::envelope::ApiResponse;
use crate::api::extract::ValidatedQuery;
use crate::domain::entities::TaricLink;
use crate::error::AppError;
use crate::state::AppState;

/// Builds the TARIC consultation link for a commodity code.
///
/// # Endpoint
///
/// `GET /api/taric-link?code=850760`
///
/// # Response
///
/// ```json
/// {
///   "ok": true,
///   "status": 200,
///   "data": {
///     "code": "850760",
///     "link": "https://ec.europa.eu/taxation_customs/dds2/taric/taric_consultation.jsp?Lang=en&Taric=850760"
///   }
/// }
/// ```
pub async fn taric_link_handler(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<TaricParams>,
) -> Result<ApiResponse<TaricLink>, AppError> {
    let served = state.taric_service.link(&params.code).await;
    Ok(served.into())
}
