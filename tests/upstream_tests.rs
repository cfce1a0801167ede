//! `HttpUpstream` against a local mock server

use std::time::Duration;

use nalssi::{HttpUpstream, NalssiError, Upstream, UpstreamRequest};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> HttpUpstream {
    HttpUpstream::new(Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_edge_request_sends_bearer_and_accept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/functions/v1/weather-api"))
        .and(query_param("endpoint", "current"))
        .and(header("Authorization", "Bearer secret-token"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"WeatherText": "Sunny"}])))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!(
        "{}/functions/v1/weather-api?endpoint=current&locationKey=226081",
        server.uri()
    );
    let value = client()
        .get_json(UpstreamRequest::edge(url, Some("secret-token")))
        .await
        .unwrap();

    assert_eq!(value[0]["WeatherText"], "Sunny");
}

#[tokio::test]
async fn test_plain_request_has_no_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let upstream = client();
    let value = upstream
        .get_json(UpstreamRequest::new(format!("{}/v1/search?name=Suwon", server.uri())))
        .await
        .unwrap();
    assert_eq!(value, json!({"results": []}));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_error_status_is_propagated_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid JWT"))
        .mount(&server)
        .await;

    let err = client()
        .get_json(UpstreamRequest::edge(server.uri(), None))
        .await
        .unwrap_err();

    match err {
        NalssiError::Upstream { status, message } => {
            assert_eq!(status, Some(401));
            assert_eq!(message, "401 - Invalid JWT");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_json_has_no_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client()
        .get_json(UpstreamRequest::new(server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, NalssiError::Upstream { status: None, .. }));
    assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_unreachable_host_is_a_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let uri = format!("http://127.0.0.1:{port}/");

    let err = client()
        .get_json(UpstreamRequest::new(uri))
        .await
        .unwrap_err();

    assert!(matches!(err, NalssiError::Upstream { status: None, .. }));
}
