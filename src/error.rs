//! Application error type and its conversion to the failure envelope.

use crate::api::envelope::failure;
use crate::infrastructure::http::FetchError;
use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use validator::ValidationErrors;

/// `Retry-After` sent on an upstream 429 that did not say how long to wait.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("Too many requests")]
    RateLimited { retry_after_secs: u64 },

    #[error("{0}")]
    Config(String),

    /// Upstream failure carrying the fetch client's code.
    #[error("{message}")]
    Upstream {
        message: String,
        code: String,
        status: StatusCode,
        details: Option<Value>,
        retry_after_secs: Option<u64>,
    },

    #[error("{message}")]
    ExternalApiDown {
        message: String,
        details: Option<Value>,
    },

    #[error("{0}")]
    UpstreamParsing(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn external_api_down(message: impl Into<String>, details: Option<Value>) -> Self {
        Self::ExternalApiDown {
            message: message.into(),
            details,
        }
    }

    pub fn parsing(message: impl Into<String>) -> Self {
        Self::UpstreamParsing(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Maps a fetch failure. An upstream 400 means we sent a bad request,
    /// which is our gateway's fault: 502. Other statuses are mirrored.
    pub fn upstream(message: impl Into<String>, err: &FetchError) -> Self {
        let status = match err {
            FetchError::Http { status: 400, .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::from_u16(err.status())
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
        };

        Self::Upstream {
            message: message.into(),
            code: err.code(),
            status,
            details: err.details().cloned(),
            retry_after_secs: err.retry_after(),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Upstream { code, .. } => code,
            Self::ExternalApiDown { .. } => "EXTERNAL_API_DOWN",
            Self::UpstreamParsing(_) => "UPSTREAM_PARSING_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Config(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream { status, .. } => *status,
            Self::ExternalApiDown { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::UpstreamParsing(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Seconds a client should wait; only meaningful on 429.
    fn retry_after(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after_secs } => Some(*retry_after_secs),
            Self::Upstream {
                status,
                retry_after_secs,
                ..
            } if *status == StatusCode::TOO_MANY_REQUESTS => {
                Some(retry_after_secs.unwrap_or(DEFAULT_RETRY_AFTER_SECS))
            }
            _ => None,
        }
    }

    fn details(&self) -> Option<Value> {
        match self {
            Self::Validation { details, .. } => Some(details.clone()),
            Self::Upstream { details, .. } | Self::ExternalApiDown { details, .. } => {
                details.clone()
            }
            _ => None,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        Self::bad_request("Invalid parameters", details)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(code = self.code(), "{}", self);
        }

        let mut response = failure(&self.to_string(), self.code(), status, self.details());

        if let Some(secs) = self.retry_after() {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> FetchError {
        FetchError::Http {
            status,
            message: "x".into(),
            details: json!({ "reason": "nope" }),
            retry_after: None,
        }
    }

    #[test]
    fn test_upstream_bad_request_becomes_bad_gateway() {
        let err = AppError::upstream("fx failed", &http(400));
        assert_eq!(err.code(), "UPSTREAM_BAD_REQUEST");
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_upstream_statuses_are_mirrored() {
        assert_eq!(AppError::upstream("x", &http(503)).status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(AppError::upstream("x", &http(429)).code(), "RATE_LIMITED");
        assert_eq!(AppError::upstream("x", &http(404)).code(), "HTTP_404");

        let timeout = FetchError::Timeout { timeout_ms: 10 };
        assert_eq!(AppError::upstream("x", &timeout).status(), StatusCode::REQUEST_TIMEOUT);

        let network = FetchError::Network { message: "refused".into() };
        let err = AppError::upstream("x", &network);
        assert_eq!(err.code(), "NETWORK_ERROR");
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_upstream_keeps_details() {
        let err = AppError::upstream("x", &http(500));
        assert_eq!(err.details(), Some(json!({ "reason": "nope" })));
    }

    #[test]
    fn test_rate_limited_response_has_retry_after() {
        let response = AppError::RateLimited { retry_after_secs: 42 }.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "42");
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    }

    #[test]
    fn test_upstream_throttle_forwards_retry_after() {
        let throttled = FetchError::Http {
            status: 429,
            message: "Too Many Requests".into(),
            details: Value::Null,
            retry_after: Some(30),
        };
        let response = AppError::upstream("x", &throttled).into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "30");

        let response = AppError::upstream("x", &http(429)).into_response();
        assert_eq!(response.headers()[header::RETRY_AFTER], "60");

        let response = AppError::upstream("x", &http(503)).into_response();
        assert!(response.headers().get(header::RETRY_AFTER).is_none());
    }

    #[test]
    fn test_codes() {
        assert_eq!(AppError::config("no key").code(), "CONFIG_ERROR");
        assert_eq!(AppError::parsing("bad").status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            AppError::external_api_down("down", None).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(AppError::internal("boom").code(), "INTERNAL_ERROR");
    }
}
