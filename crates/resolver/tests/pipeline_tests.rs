//! End-to-end resolution against a mock Vault server.
//!
//! # Invariants
//! - Credentials come from files written to a temp directory.
//! - The environment is injected; the process environment is never read.

use std::collections::HashMap;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;
use vault_client::testing::load_fixture;
use vault_config::ConfigNode;
use vault_resolver::{ResolveError, resolve_configuration};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn approle_env(server: &MockServer, dir: &Path) -> HashMap<String, String> {
    std::fs::write(dir.join("role_id"), "role-123\n").unwrap();
    std::fs::write(dir.join("secret_id"), "secret-456\n").unwrap();
    HashMap::from([
        ("VAULT_ADDR".to_string(), server.uri()),
        ("VAULT_MOUNTPOINT".to_string(), "secret".to_string()),
        (
            "APPROLE_ROLE_ID_PATH".to_string(),
            dir.join("role_id").display().to_string(),
        ),
        (
            "APPROLE_SECRET_ID_PATH".to_string(),
            dir.join("secret_id").display().to_string(),
        ),
    ])
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/auth/approle/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("auth/login_success.json")),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_resolves_fields_and_dictionaries() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_login(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/data/mssql"))
        .and(header("X-Vault-Token", "hvs.test-client-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("kv/read_mssql.json")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/secret/data/mssql/clients"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("kv/read_clients.json")),
        )
        .mount(&mock_server)
        .await;

    let tree = ConfigNode::from_json(&json!({
        "ConnectionStrings": {
            "Default": "User={% vault_secret mssql:user %};Password={% vault_secret mssql:password %}",
            "ClientContexts": "{% vault_dict mssql/clients %}"
        },
        "Logging": {"Level": "Info"}
    }));

    let env = approle_env(&mock_server, dir.path());
    let overlay = resolve_configuration(&tree, &env).await.unwrap();

    assert_eq!(
        overlay.get("ConnectionStrings:Default"),
        Some("User=app_user;Password=password123")
    );
    assert_eq!(
        overlay.get("ConnectionStrings:ClientContexts:client1"),
        Some("Server=db;Database=client1")
    );
    assert!(!overlay.contains("ConnectionStrings:ClientContexts"));
    assert!(!overlay.contains("Logging:Level"));
}

#[tokio::test]
async fn test_forbidden_mount_is_permission_denied() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_login(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/data/mssql"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(load_fixture("errors/permission_denied.json")),
        )
        .mount(&mock_server)
        .await;

    let tree = ConfigNode::from_json(&json!({"Db": "{% vault_secret mssql:password %}"}));
    let err = resolve_configuration(&tree, &approle_env(&mock_server, dir.path()))
        .await
        .unwrap_err();
    assert!(matches!(err, ResolveError::PermissionDenied { ref mount_point } if mount_point == "secret"));
}

#[tokio::test]
async fn test_missing_path_is_missing_secret() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_login(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/data/absent"))
        .respond_with(ResponseTemplate::new(404).set_body_json(load_fixture("errors/not_found.json")))
        .mount(&mock_server)
        .await;

    let tree = ConfigNode::from_json(&json!({"Db": "{% vault_secret absent:password %}"}));
    let err = resolve_configuration(&tree, &approle_env(&mock_server, dir.path()))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Didn't find the required field password at vault path absent"
    );
}

#[tokio::test]
async fn test_env_settings_override_vault_section() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_login(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/data/mssql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("kv/read_mssql.json")))
        .mount(&mock_server)
        .await;

    let tree = ConfigNode::from_json(&json!({
        "Vault": {"vaultAddress": "http://unreachable.invalid:8200", "mountPoint": "other"},
        "Db": "{% vault_secret mssql:user %}"
    }));
    let overlay = resolve_configuration(&tree, &approle_env(&mock_server, dir.path()))
        .await
        .unwrap();
    assert_eq!(overlay.get("Db"), Some("app_user"));
}

#[tokio::test]
async fn test_unreachable_vault_is_connectivity() {
    let mock_server = MockServer::builder().start().await;
    let dir = TempDir::new().unwrap();
    let env = approle_env(&mock_server, dir.path());
    drop(mock_server);

    let tree = ConfigNode::from_json(&json!({"Db": "{% vault_secret mssql:user %}"}));
    let err = resolve_configuration(&tree, &env).await.unwrap_err();
    assert!(matches!(err, ResolveError::Connectivity { .. }), "got {err:?}");
}
