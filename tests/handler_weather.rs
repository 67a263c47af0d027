mod common;

use axum::http::{StatusCode, header};
use serde_json::{Value, json};
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn forecast_body() -> Value {
    json!({
        "latitude": 48.86,
        "longitude": 2.35,
        "timezone": "Europe/Paris",
        "current_weather": {
            "temperature": 12.4,
            "windspeed": 9.7,
            "weathercode": 3,
            "time": "2026-03-04T09:45"
        }
    })
}

#[tokio::test]
async fn test_weather_by_coordinates() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("latitude", "48.85"))
        .and(query_param("longitude", "2.35"))
        .and(query_param("current_weather", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&upstream)
        .await;

    let server = common::test_server(common::create_test_state(&upstream));

    let response = server
        .get("/api/weather")
        .add_query_param("lat", "48.85")
        .add_query_param("lon", "2.35")
        .await;

    response.assert_status_ok();
    assert_eq!(response.header(header::CACHE_CONTROL), "public, max-age=1800");

    let json = response.json::<Value>();
    assert_eq!(json["data"]["location"], "Europe/Paris");
    assert_eq!(json["data"]["temperature"], 12.4);
    assert_eq!(json["data"]["windSpeed"], 9.7);
    assert_eq!(json["data"]["condition"], 3);
    assert_eq!(json["data"]["updatedAt"], "2026-03-04T09:45");

    // Cached under the same coordinates.
    let again = server
        .get("/api/weather")
        .add_query_param("lat", "48.85")
        .add_query_param("lon", "2.35")
        .await;
    assert_eq!(again.json::<Value>()["data"], json["data"]);
}

#[tokio::test]
async fn test_weather_by_city_with_sparse_payload() {
    let upstream = MockServer::start().await;
    Mock::given(path("/forecast"))
        .and(query_param("city", "Lyon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&upstream)
        .await;

    let server = common::test_server(common::create_test_state(&upstream));

    let response = server.get("/api/weather").add_query_param("city", " Lyon ").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["data"]["location"], "Unknown");
    assert!(json["data"]["temperature"].is_null());
    assert!(json["data"]["updatedAt"].is_string());
}

#[tokio::test]
async fn test_weather_validation() {
    let upstream = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let server = common::test_server(common::create_test_state(&upstream));

    let cases: [&[(&str, &str)]; 6] = [
        &[],
        &[("lat", "48.85")],
        &[("lat", "91"), ("lon", "0")],
        &[("lat", "0"), ("lon", "-181")],
        &[("lat", "north"), ("lon", "2.35")],
        &[("city", "P")],
    ];

    for params in cases {
        let mut request = server.get("/api/weather");
        for (key, value) in params {
            request = request.add_query_param(*key, *value);
        }

        let response = request.await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_expired_entry_is_fetched_again() {
    let upstream = MockServer::start().await;
    Mock::given(path("/forecast"))
        .and(query_param("city", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(2)
        .mount(&upstream)
        .await;

    let server = common::test_server(common::create_test_state(&upstream));

    server.get("/api/weather").add_query_param("city", "Paris").await.assert_status_ok();
    server.get("/api/weather").add_query_param("city", "Paris").await.assert_status_ok();

    // Jump past the 30 minute lifetime, then let real I/O run again.
    tokio::time::pause();
    tokio::time::advance(std::time::Duration::from_secs(30 * 60 + 1)).await;
    tokio::time::resume();

    server.get("/api/weather").add_query_param("city", "Paris").await.assert_status_ok();
}
