//! Authentication endpoint tests.
//!
//! This module tests the Vault login endpoints, including:
//! - Successful login with token and lease extraction
//! - Rejected credential handling
//! - Request bodies for each auth method
//!
//! # What this does NOT handle
//! - Lazy login on first read (see kv_tests.rs)

mod common;

use common::*;
use secrecy::SecretString;
use serde_json::json;
use vault_client::ClientError;
use wiremock::matchers::{body_json, method, path};

#[tokio::test]
async fn test_approle_login_success() {
    let mock_server = MockServer::start().await;

    let fixture = load_fixture("auth/login_success.json");

    Mock::given(method("POST"))
        .and(path("/v1/auth/approle/login"))
        .and(body_json(json!({"role_id": "test-role-id", "secret_id": "test-secret-id"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(&fixture))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let (token, lease) = endpoints::login(&client, &mock_server.uri(), &approle_method())
        .await
        .unwrap();

    assert_eq!(token, "hvs.test-client-token");
    assert_eq!(lease, 3600);
}

#[tokio::test]
async fn test_kubernetes_login_sends_role_and_jwt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/k8s-prod/login"))
        .and(body_json(json!({"role": "reader", "jwt": "eyJ.token"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("auth/login_success.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let method = AuthMethod::Kubernetes {
        mount: "k8s-prod".to_string(),
        role: "reader".to_string(),
        jwt: SecretString::new("eyJ.token".into()),
    };
    let result = endpoints::login(&Client::new(), &mock_server.uri(), &method).await;
    assert!(result.is_ok(), "login failed: {result:?}");
}

#[tokio::test]
async fn test_certificate_login_sends_role_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/cert/login"))
        .and(body_json(json!({"name": "web"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("auth/login_success.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let method = AuthMethod::Certificate {
        mount: "cert".to_string(),
        role: "web".to_string(),
    };
    let result = endpoints::login(&Client::new(), &mock_server.uri(), &method).await;
    assert!(result.is_ok(), "login failed: {result:?}");
}

#[tokio::test]
async fn test_login_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/approle/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(load_fixture("errors/invalid_role.json")),
        )
        .mount(&mock_server)
        .await;

    let err = endpoints::login(&Client::new(), &mock_server.uri(), &approle_method())
        .await
        .unwrap_err();

    match err {
        ClientError::AuthFailed(message) => {
            assert!(message.contains("approle login rejected (400)"));
            assert!(message.contains("invalid role or secret ID"));
            assert!(!message.contains("test-secret-id"));
        }
        other => panic!("Expected AuthFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_login_response_without_auth_is_invalid() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/approle/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"auth": null})))
        .mount(&mock_server)
        .await;

    let err = endpoints::login(&Client::new(), &mock_server.uri(), &approle_method())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}
