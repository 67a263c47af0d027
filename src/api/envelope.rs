//! Uniform JSON envelope for every `/api/*` response.
//!
//! Success bodies look like `{ "ok": true, "data": ..., "status": 200 }`,
//! failures like `{ "ok": false, "error": ..., "code": ..., "status": ...,
//! "details": ... }` with `details` omitted when empty.

use crate::application::services::Served;
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct SuccessBody<T> {
    ok: bool,
    data: T,
    status: u16,
}

#[derive(Debug, Serialize)]
struct FailureBody<'a> {
    ok: bool,
    error: &'a str,
    code: &'a str,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

/// `Cache-Control` policy attached to a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    NoStore,
    Public(Duration),
}

impl CachePolicy {
    pub fn header_value(self) -> HeaderValue {
        match self {
            Self::NoStore => HeaderValue::from_static("no-store"),
            Self::Public(ttl) => {
                HeaderValue::from_str(&format!("public, max-age={}", ttl.as_secs()))
                    .unwrap_or_else(|_| HeaderValue::from_static("no-store"))
            }
        }
    }
}

/// Response extension carrying the error code, read by the access log.
#[derive(Debug, Clone)]
pub struct ErrorCode(pub String);

/// Response extension naming the upstream that produced fresh data.
#[derive(Debug, Clone, Copy)]
pub struct UpstreamTag(pub &'static str);

/// Successful enveloped response.
#[derive(Debug)]
pub struct ApiResponse<T> {
    data: T,
    status: StatusCode,
    cache: CachePolicy,
    upstream: Option<&'static str>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data,
            status: StatusCode::OK,
            cache: CachePolicy::NoStore,
            upstream: None,
        }
    }

    pub fn cache(mut self, cache: CachePolicy) -> Self {
        self.cache = cache;
        self
    }

    pub fn upstream(mut self, upstream: Option<&'static str>) -> Self {
        self.upstream = upstream;
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let body = SuccessBody {
            ok: true,
            data: self.data,
            status: self.status.as_u16(),
        };

        let mut response = (self.status, Json(body)).into_response();
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, self.cache.header_value());
        if let Some(upstream) = self.upstream {
            response.extensions_mut().insert(UpstreamTag(upstream));
        }
        response
    }
}

impl<T: Serialize> From<Served<T>> for ApiResponse<T> {
    fn from(served: Served<T>) -> Self {
        let cache = served
            .max_age
            .map(CachePolicy::Public)
            .unwrap_or(CachePolicy::NoStore);
        ApiResponse::ok(served.data)
            .cache(cache)
            .upstream(served.upstream)
    }
}

/// Builds a failure envelope. Failures are never cacheable.
pub fn failure(
    message: &str,
    code: &str,
    status: StatusCode,
    details: Option<Value>,
) -> Response {
    let body = FailureBody {
        ok: false,
        error: message,
        code,
        status: status.as_u16(),
        details,
    };

    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, CachePolicy::NoStore.header_value());
    response.extensions_mut().insert(ErrorCode(code.to_string()));
    response
}
