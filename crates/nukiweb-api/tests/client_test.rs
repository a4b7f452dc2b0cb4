#![allow(clippy::unwrap_used)]
// Integration tests for `NukiWebClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nukiweb_api::{Error, NukiWebClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, NukiWebClient) {
    let server = MockServer::start().await;
    let token = SecretString::from("test-token".to_owned());
    let client =
        NukiWebClient::from_token(&server.uri(), &token, &TransportConfig::default()).unwrap();
    (server, client)
}

fn smartlocks_body() -> serde_json::Value {
    json!([
        {
            "smartlockId": 1,
            "type": 4,
            "name": "Front door",
            "firmwareVersion": 263_940,
            "state": { "state": 1, "batteryCharge": 80, "doorState": 2 },
            "config": { "ledBrightness": 2 }
        },
        {
            "smartlockId": 2,
            "type": 2,
            "name": "Intercom",
            "state": { "state": 3 }
        }
    ])
}

// ── Device list ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_smartlocks_sends_bearer_token() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/smartlock"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(smartlocks_body()))
        .expect(1)
        .mount(&server)
        .await;

    let locks = client.list_smartlocks().await.unwrap();

    assert_eq!(locks.len(), 2);
    assert_eq!(locks[0].smartlock_id, 1);
    assert_eq!(locks[0].name, "Front door");
    assert_eq!(locks[0].state.door_state, Some(2));
    assert_eq!(locks[1].smartlock_type, 2);
    assert_eq!(locks[1].state.state, Some(3));
}

#[tokio::test]
async fn test_list_smartlocks_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/smartlock"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.list_smartlocks().await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_list_smartlocks_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/smartlock"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    match client.list_smartlocks().await {
        Err(Error::Server { status, ref message }) => {
            assert_eq!(status, 503);
            assert!(message.contains("maintenance"), "got: {message}");
        }
        other => panic!("expected Server error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_list_smartlocks_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/smartlock"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"not\": \"a list\"}"))
        .mount(&server)
        .await;

    let result = client.list_smartlocks().await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_transport_error_when_port_is_closed() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let uri = format!("http://127.0.0.1:{port}");

    let token = SecretString::from("test-token".to_owned());
    let client = NukiWebClient::from_token(&uri, &token, &TransportConfig::default()).unwrap();

    let result = client.list_smartlocks().await;
    assert!(
        matches!(result, Err(Error::Transport(_))),
        "expected Transport error, got: {result:?}"
    );
    let err = result.unwrap_err();
    assert!(err.is_transient(), "connection refused should be transient");
    assert_eq!(err.status(), None);
}

// ── Actions ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_post_action_body_and_no_content() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/smartlock/42/action"))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_json(json!({ "action": 2, "option": 0 })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.post_action(42, 2, 0).await.unwrap();
}

#[tokio::test]
async fn test_post_action_requires_no_content() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/smartlock/42/action"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let result = client.post_action(42, 1, 0).await;
    assert!(
        matches!(result, Err(Error::Server { status: 200, .. })),
        "expected Server error for 200, got: {result:?}"
    );
}

#[tokio::test]
async fn test_post_action_forbidden() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/smartlock/42/action"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = client.post_action(42, 3, 0).await.unwrap_err();
    assert!(err.is_auth_error(), "got: {err:?}");
}

// ── Config writes ───────────────────────────────────────────────────

#[tokio::test]
async fn test_update_config_posts_partial_fields() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/smartlock/7/config"))
        .and(body_json(json!({ "ledBrightness": 4 })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client
        .update_config(7, &json!({ "ledBrightness": 4 }))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_advanced_config_posts_partial_fields() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/smartlock/7/advanced/config"))
        .and(body_json(json!({ "motorSpeed": 1 })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client
        .update_advanced_config(7, &json!({ "motorSpeed": 1 }))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_config_bad_request() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/smartlock/7/config"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid ledBrightness"))
        .mount(&server)
        .await;

    match client.update_config(7, &json!({ "ledBrightness": 9 })).await {
        Err(Error::Server { status, message }) => {
            assert_eq!(status, 400);
            assert!(message.contains("ledBrightness"));
        }
        other => panic!("expected Server error, got: {other:?}"),
    }
}

// ── Token validation ────────────────────────────────────────────────

#[tokio::test]
async fn test_validate_token_true_on_success() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/smartlock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(client.validate_token().await);
}

#[tokio::test]
async fn test_validate_token_false_on_any_failure() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/smartlock"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    assert!(!client.validate_token().await);
}
