use std::time::Duration;

use newsgrid_engine::{FailureKind, FetchSettings, NewsClient, ReqwestNewsClient};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> FetchSettings {
    FetchSettings {
        endpoint: format!("{}/v2/everything", server.uri()),
        ..FetchSettings::new("test-key")
    }
}

#[tokio::test]
async fn search_sends_query_and_key_and_parses_articles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .and(query_param("q", "bitcoin price"))
        .and(query_param("apiKey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"ok","totalResults":2,"articles":[
                {"title":"A","description":"B","url":"u1","urlToImage":"i1"},
                {"title":"[Removed]","description":"[Removed]","url":"u2","urlToImage":null}
            ]}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = ReqwestNewsClient::new(settings_for(&server)).expect("client");
    let response = client.search("bitcoin price").await.expect("search ok");

    assert_eq!(response.status.as_deref(), Some("ok"));
    assert_eq!(response.articles.len(), 2);
    assert_eq!(response.articles[0].title.as_deref(), Some("A"));
    assert_eq!(response.articles[0].url_to_image.as_deref(), Some("i1"));
    assert_eq!(response.articles[1].url_to_image, None);
}

#[tokio::test]
async fn search_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(ResponseTemplate::new(401).set_body_raw(
            r#"{"status":"error","code":"apiKeyInvalid"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let client = ReqwestNewsClient::new(settings_for(&server)).expect("client");
    let err = client.search("rust").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(401));
}

#[tokio::test]
async fn search_fails_on_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"articles\": 5}", "application/json"))
        .mount(&server)
        .await;

    let client = ReqwestNewsClient::new(settings_for(&server)).expect("client");
    let err = client.search("rust").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::MalformedBody);
}

#[tokio::test]
async fn search_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw(r#"{"articles":[]}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let client = ReqwestNewsClient::new(settings).expect("client");
    let err = client.search("slow").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
    assert!(!err.message.contains("test-key"));
}

#[tokio::test]
async fn search_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"articles":[{"title":"x"}]}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..settings_for(&server)
    };
    let client = ReqwestNewsClient::new(settings).expect("client");
    let err = client.search("big").await.unwrap_err();

    assert!(matches!(err.kind, FailureKind::TooLarge { max_bytes: 10, .. }));
}

#[test]
fn invalid_endpoint_fails_at_construction() {
    let settings = FetchSettings {
        endpoint: "::not-a-url".to_string(),
        ..FetchSettings::new("k")
    };

    let err = ReqwestNewsClient::new(settings).unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidEndpoint);
}
