use std::time::Duration;

use agent_api::{AgentApiClient, AgentApiConfig, AgentApiError, AgentRequest};

#[test]
fn http_request_posts_json_to_agent_endpoint() {
    let client = AgentApiClient::new(AgentApiConfig::new("http://127.0.0.1:8000")).expect("client");

    let http_request = client
        .build_request(&AgentRequest::new("hello"))
        .expect("build request")
        .build()
        .expect("request");

    assert_eq!(http_request.url().as_str(), "http://127.0.0.1:8000/agent");
    assert_eq!(http_request.method(), "POST");
    assert_eq!(
        http_request
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok()),
        Some("application/json")
    );

    let body = http_request
        .body()
        .and_then(|body| body.as_bytes())
        .expect("buffered body");
    let value: serde_json::Value = serde_json::from_slice(body).expect("json body");
    assert_eq!(value, serde_json::json!({"message": "hello"}));
}

#[test]
fn client_keeps_config_and_endpoint() {
    let config =
        AgentApiConfig::new("https://movies.example/api/").with_timeout(Duration::from_secs(5));
    let client = AgentApiClient::new(config).expect("client");

    assert_eq!(client.endpoint(), "https://movies.example/api/agent");
    assert_eq!(client.config().timeout, Some(Duration::from_secs(5)));
}

#[test]
fn client_rejects_unparseable_base_url() {
    let error = AgentApiClient::new(AgentApiConfig::new("not a url")).expect_err("must fail");
    assert!(matches!(error, AgentApiError::InvalidBaseUrl(_)));
}

#[test]
fn client_rejects_non_http_scheme() {
    let error =
        AgentApiClient::new(AgentApiConfig::new("ftp://movies.example")).expect_err("must fail");
    assert!(matches!(error, AgentApiError::InvalidBaseUrl(message) if message.contains("ftp")));
}
