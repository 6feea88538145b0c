//! Integration tests against a mock RESTCONF server
//!
//! The client is blocking, so every call runs inside `spawn_blocking`.

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nso_restconf::{
    ClientConfig, ContentFilter, Datastore, QueryParams, ResourcePath, RestconfClient,
    RestconfError,
};

fn config_for(server: &MockServer) -> ClientConfig {
    let address = server.address();
    ClientConfig::new(address.ip().to_string(), "admin", "admin").with_port(address.port())
}

/// Run a closure against a fresh blocking client
async fn with_client<F, R>(server: &MockServer, f: F) -> R
where
    F: FnOnce(RestconfClient) -> R + Send + 'static,
    R: Send + 'static,
{
    let config = config_for(server);
    tokio::task::spawn_blocking(move || f(RestconfClient::new(config).unwrap()))
        .await
        .unwrap()
}

fn device_path() -> ResourcePath {
    ResourcePath::new()
        .child("tailf-ncs:devices")
        .entry("device", ["ex0"])
}

#[tokio::test]
async fn test_get_returns_mapping() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/restconf/data/tailf-ncs:devices/device=ex0"))
        .and(header("accept", "application/yang-data+json"))
        .and(header("authorization", "Basic YWRtaW46YWRtaW4="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"a": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let result = with_client(&server, |client| {
        client.get(Datastore::Unified, &device_path())
    })
    .await;

    assert_eq!(result.unwrap(), Some(json!({"a": 1})));
}

#[tokio::test]
async fn test_get_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": {"error": [{"error-message": "test"}]}
        })))
        .mount(&server)
        .await;

    let result = with_client(&server, |client| {
        client.get(Datastore::Unified, &device_path())
    })
    .await;

    match result {
        Err(RestconfError::NotFound { message, .. }) => assert_eq!(message, "test"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_auth_and_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/restconf/data/a"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/restconf/data/b"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let (auth, server_error) = with_client(&server, |client| {
        (
            client.get(Datastore::Unified, &ResourcePath::new().child("a")),
            client.get(Datastore::Unified, &ResourcePath::new().child("b")),
        )
    })
    .await;

    assert!(matches!(auth, Err(RestconfError::Auth { status: 401, .. })));
    assert!(matches!(
        server_error,
        Err(RestconfError::Server { status: 502, .. })
    ));
}

#[tokio::test]
async fn test_malformed_body_carries_raw_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("should be json"))
        .mount(&server)
        .await;

    let result = with_client(&server, |client| {
        client.get(Datastore::Unified, &ResourcePath::new())
    })
    .await;

    match result {
        Err(RestconfError::MalformedResponse { body, .. }) => assert_eq!(body, "should be json"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_utf8_body_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"{\"a\": \"\xff\"}".to_vec(), "application/yang-data+json"),
        )
        .mount(&server)
        .await;

    let result = with_client(&server, |client| {
        client.get(Datastore::Unified, &ResourcePath::new())
    })
    .await;

    match result {
        Err(RestconfError::MalformedResponse { body, .. }) => {
            assert_eq!(body, "{\"a\": \"\u{fffd}\"}");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_put_sends_json_and_accepts_no_content() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/restconf/data/tailf-ncs:devices/device=ex0"))
        .and(header("content-type", "application/yang-data+json"))
        .and(body_json(json!({"x": 1})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let result = with_client(&server, |client| {
        client.put(Datastore::Unified, &device_path(), &json!({"x": 1}))
    })
    .await;

    assert_eq!(result.unwrap(), None);
}

#[tokio::test]
async fn test_post_returns_body_and_validation_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/restconf/data/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"a": "b"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/restconf/data/bad"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ietf-restconf:errors": {"error": [{"error-message": "missing leaf"}]}
        })))
        .mount(&server)
        .await;

    let (ok, bad) = with_client(&server, |client| {
        let payload = json!({"test": "data"});
        (
            client.post(Datastore::Unified, &ResourcePath::new().child("ok"), &payload),
            client.post(Datastore::Unified, &ResourcePath::new().child("bad"), &payload),
        )
    })
    .await;

    assert_eq!(ok.unwrap(), Some(json!({"a": "b"})));
    match bad {
        Err(RestconfError::Validation { message, .. }) => assert_eq!(message, "missing leaf"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_on_running_datastore() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(
            "/restconf/ds/ietf-datastores:running/tailf-ncs:devices/device=ex0",
        ))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let result = with_client(&server, |client| {
        client.delete(Datastore::Running, &device_path())
    })
    .await;

    assert_eq!(result.unwrap(), None);
}

#[tokio::test]
async fn test_exists_with_content_filter() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/restconf/data/devices/ex0"))
        .and(query_param("content", "nonconfig"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/restconf/data/devices/ex1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (present, absent) = with_client(&server, |client| {
        let params = QueryParams::new().with_content(ContentFilter::Nonconfig);
        (
            client.exists_with_params(
                Datastore::Unified,
                &ResourcePath::parse("devices/ex0").unwrap(),
                &params,
            ),
            client.exists(
                Datastore::Unified,
                &ResourcePath::parse("devices/ex1").unwrap(),
            ),
        )
    })
    .await;

    assert!(present.unwrap());
    assert!(!absent.unwrap());
}

#[tokio::test]
async fn test_options_lists_allowed_methods() {
    let server = MockServer::start().await;

    Mock::given(method("OPTIONS"))
        .and(path("/restconf/data"))
        .respond_with(ResponseTemplate::new(200).insert_header("allow", "GET,PUT"))
        .mount(&server)
        .await;

    let result = with_client(&server, |client| {
        client.options(Datastore::Unified, &ResourcePath::new())
    })
    .await;

    assert_eq!(result.unwrap(), vec!["GET", "PUT"]);
}

#[tokio::test]
async fn test_info_issues_exactly_one_get() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/restconf/data/ietf-yang-library:modules-state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ietf-yang-library:modules-state": {"module-set-id": "f4a1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let info: Value = with_client(&server, |client| client.info()).await.unwrap();

    assert_eq!(info["module-set-id"], "f4a1");
}

#[tokio::test]
async fn test_transport_error_when_server_is_gone() {
    let server = MockServer::start().await;
    let config = config_for(&server);
    drop(server);

    let result = tokio::task::spawn_blocking(move || {
        let client = RestconfClient::new(config).unwrap();
        client.get(Datastore::Unified, &ResourcePath::new())
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(RestconfError::Transport(_))));
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"a": 1}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = config_for(&server).with_timeout(Duration::from_millis(300));
    let result = tokio::task::spawn_blocking(move || {
        let client = RestconfClient::new(config).unwrap();
        client.get(Datastore::Unified, &ResourcePath::new())
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(RestconfError::Transport(_))));
}
