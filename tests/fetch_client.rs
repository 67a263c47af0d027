use serde_json::{Value, json};
use std::time::Duration;
use trade_data_api::infrastructure::http::{FetchClient, FetchDefaults, FetchError, ResponseFormat};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(retries: u32) -> FetchClient {
    FetchClient::new(FetchDefaults {
        timeout: Duration::from_millis(300),
        retries,
        retry_delay: Duration::from_millis(10),
        user_agent: "fetch-tests/1.0".to_string(),
    })
    .unwrap()
}

#[tokio::test]
async fn test_immediate_success() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .and(header("user-agent", "fetch-tests/1.0"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "hello": "world" })))
        .expect(1)
        .mount(&upstream)
        .await;

    let client = client(2);
    let fetched = client
        .fetch_json(&format!("{}/ok", upstream.uri()), client.options())
        .await
        .unwrap();

    assert_eq!(fetched.status, 200);
    assert_eq!(fetched.data, json!({ "hello": "world" }));
}

#[tokio::test]
async fn test_service_unavailable_is_retried() {
    let upstream = MockServer::start().await;
    Mock::given(path("/flaky"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "error": "busy" })))
        .expect(3)
        .mount(&upstream)
        .await;

    let client = client(2);
    let err = client
        .fetch_json(&format!("{}/flaky", upstream.uri()), client.options())
        .await
        .unwrap_err();

    assert_eq!(err.code(), "UPSTREAM_5XX");
    assert_eq!(err.status(), 503);
    assert_eq!(err.details(), Some(&json!({ "error": "busy" })));
}

#[tokio::test]
async fn test_recovers_after_transient_failure() {
    let upstream = MockServer::start().await;
    Mock::given(path("/recover"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .expect(1)
        .mount(&upstream)
        .await;
    Mock::given(path("/recover"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
        .expect(1)
        .mount(&upstream)
        .await;

    let client = client(2);
    let fetched = client
        .fetch_json(&format!("{}/recover", upstream.uri()), client.options())
        .await
        .unwrap();

    assert_eq!(fetched.data, json!([1, 2, 3]));
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let upstream = MockServer::start().await;
    Mock::given(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&upstream)
        .await;

    let client = client(2);
    let err = client
        .fetch_json(&format!("{}/missing", upstream.uri()), client.options())
        .await
        .unwrap_err();

    assert_eq!(err.code(), "HTTP_404");
    assert!(err.details().is_none());
}

#[tokio::test]
async fn test_timeout() {
    let upstream = MockServer::start().await;
    Mock::given(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&upstream)
        .await;

    let client = client(0);
    let options = client.options().timeout(Duration::from_millis(100));
    let err = client
        .fetch_json(&format!("{}/slow", upstream.uri()), options)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Timeout { timeout_ms: 100 }));
    assert_eq!(err.code(), "TIMEOUT");
    assert_eq!(err.status(), 408);
}

#[tokio::test]
async fn test_network_error() {
    let client = client(1);
    let err = client
        .fetch_json("http://127.0.0.1:9/closed", client.options())
        .await
        .unwrap_err();

    assert!(err.is_network());
    assert_eq!(err.code(), "NETWORK_ERROR");
    assert_eq!(err.status(), 503);
}

#[tokio::test]
async fn test_post_text_body() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/soap"))
        .and(header("content-type", "text/xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"looks\":\"like json\"}"))
        .expect(1)
        .mount(&upstream)
        .await;

    let client = client(0);
    let options = client
        .options()
        .post("<Envelope/>")
        .header(reqwest::header::CONTENT_TYPE, "text/xml")
        .format(ResponseFormat::Text);
    let fetched = client
        .fetch_json(&format!("{}/soap", upstream.uri()), options)
        .await
        .unwrap();

    assert_eq!(fetched.data, Value::String("{\"looks\":\"like json\"}".to_string()));
}
