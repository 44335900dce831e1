//! Integration tests for `NominatimClient` and `AddressResolver` against a
//! local `wiremock` server.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ferias_geocode::{AddressResolver, GeocodeError, NominatimClient, RetryPolicy};

fn test_client(server: &MockServer) -> NominatimClient {
    NominatimClient::with_base_url("ferias-test/0.1", 5, &server.uri())
        .expect("failed to build test NominatimClient")
}

fn place(lat: &str, lon: &str) -> serde_json::Value {
    json!([{
        "place_id": 1,
        "lat": lat,
        "lon": lon,
        "display_name": "Convención, Barrio Sur, Montevideo, Uruguay"
    }])
}

#[tokio::test]
async fn search_parses_string_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Convención y Soriano, Montevideo, Uruguay"))
        .and(query_param("format", "jsonv2"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(place("-34.9105", "-56.1951")))
        .mount(&server)
        .await;

    let c = test_client(&server)
        .search("Convención y Soriano, Montevideo, Uruguay")
        .await
        .unwrap();
    assert!((c.latitude - -34.9105).abs() < 1e-9);
    assert!((c.longitude - -56.1951).abs() < 1e-9);
}

#[tokio::test]
async fn empty_result_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let result = test_client(&server).search("Calle Inexistente").await;
    assert!(
        matches!(result, Err(GeocodeError::NotFound { ref query }) if query == "Calle Inexistente"),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn http_429_is_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let result = test_client(&server).search("Rondeau").await;
    assert!(matches!(result, Err(GeocodeError::RateLimited { .. })));
}

#[tokio::test]
async fn server_error_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let result = test_client(&server).search("Rondeau").await;
    assert!(matches!(result, Err(GeocodeError::Status { status: 502, .. })));
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = test_client(&server).search("Rondeau").await;
    assert!(matches!(result, Err(GeocodeError::Deserialize { .. })));
}

#[tokio::test]
async fn resolver_retries_rate_limits_against_live_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(3)
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("q", "Minas y Colonia, Montevideo, Uruguay"))
        .respond_with(ResponseTemplate::new(200).set_body_json(place("-34.9040", "-56.1880")))
        .expect(1)
        .mount(&server)
        .await;

    let mut resolver = AddressResolver::new(test_client(&server), "Montevideo, Uruguay")
        .with_policy(RetryPolicy::immediate(3))
        .with_request_delay(Duration::ZERO);
    let c = resolver.resolve("Minas y Colonia").await.unwrap();
    assert!((c.latitude - -34.9040).abs() < 1e-9);
}
