//! Extractors that deserialize and validate in one step.
//!
//! Rejections from axum's own `Query` and `Json` extractors are converted to
//! the `VALIDATION_ERROR` envelope so malformed input never reaches a service.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use validator::Validate;

use crate::error::AppError;

/// Query string deserialized into `T` and validated.
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::bad_request(
                    "Invalid parameters",
                    json!({ "reason": rejection.body_text() }),
                )
            })?;

        value.validate()?;
        Ok(Self(value))
    }
}

/// JSON body deserialized into `T` and validated.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::bad_request(
                    "Invalid request body",
                    json!({ "reason": rejection.body_text() }),
                )
            })?;

        value.validate()?;
        Ok(Self(value))
    }
}
