mod common;

use axum::http::{StatusCode, header};
use serde_json::Value;
use std::sync::Arc;
use trade_data_api::infrastructure::cache::MemoryCache;
use wiremock::matchers::path;
use wiremock::{Mock, MockServer, ResponseTemplate};

const CAPACITY: u32 = 3;

async fn limited_server(upstream: &MockServer) -> axum_test::TestServer {
    Mock::given(path("/taric"))
        .respond_with(ResponseTemplate::new(200))
        .mount(upstream)
        .await;

    let state = common::create_test_state_with(
        &common::upstreams(upstream),
        Arc::new(MemoryCache::new(10)),
        CAPACITY,
    );
    common::test_server(state)
}

#[tokio::test]
async fn test_exactly_capacity_requests_pass() {
    let upstream = MockServer::start().await;
    let server = limited_server(&upstream).await;

    for _ in 0..CAPACITY {
        server
            .get("/api/taric-link")
            .add_query_param("code", "850760")
            .add_header("X-Forwarded-For", "198.51.100.1")
            .await
            .assert_status_ok();
    }

    let response = server
        .get("/api/taric-link")
        .add_query_param("code", "850760")
        .add_header("X-Forwarded-For", "198.51.100.1")
        .await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.header(header::CACHE_CONTROL), "no-store");

    let retry_after: u64 = response
        .header(header::RETRY_AFTER)
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!((1..=60).contains(&retry_after));

    let json = response.json::<Value>();
    assert_eq!(json["ok"], false);
    assert_eq!(json["code"], "RATE_LIMITED");
    assert_eq!(json["status"], 429);
}

#[tokio::test]
async fn test_rate_limit_precedes_validation() {
    let upstream = MockServer::start().await;
    let server = limited_server(&upstream).await;

    for _ in 0..CAPACITY {
        server
            .get("/api/taric-link")
            .add_query_param("code", "bad")
            .add_header("X-Real-IP", "198.51.100.2")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    server
        .get("/api/taric-link")
        .add_query_param("code", "bad")
        .add_header("X-Real-IP", "198.51.100.2")
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_buckets_are_per_client_and_per_route() {
    let upstream = MockServer::start().await;
    let server = limited_server(&upstream).await;

    for _ in 0..CAPACITY {
        server
            .get("/api/taric-link")
            .add_query_param("code", "850760")
            .add_header("X-Forwarded-For", "198.51.100.3, 10.0.0.1")
            .await;
    }

    // Another client still has its full quota.
    server
        .get("/api/taric-link")
        .add_query_param("code", "850760")
        .add_header("X-Forwarded-For", "198.51.100.4")
        .await
        .assert_status_ok();

    // The same client has a separate bucket on another route.
    server
        .get("/api/fx")
        .add_query_param("base", "nope")
        .add_header("X-Forwarded-For", "198.51.100.3")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_vies_aliases_share_a_bucket() {
    let upstream = MockServer::start().await;
    let server = limited_server(&upstream).await;

    for route in ["/api/vies", "/api/vies/validate", "/api/vies/valider"] {
        server
            .get(route)
            .add_query_param("vat", "x")
            .add_header("X-Forwarded-For", "198.51.100.5")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    server
        .get("/api/vies/validate")
        .add_query_param("vat", "x")
        .add_header("X-Forwarded-For", "198.51.100.5")
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_health_is_not_rate_limited() {
    let upstream = MockServer::start().await;
    let server = limited_server(&upstream).await;

    for _ in 0..(CAPACITY * 2) {
        server.get("/health").await.assert_status_ok();
    }
}
