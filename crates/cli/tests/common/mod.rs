//! Shared test utilities for vaultcfg integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Write AppRole credential files and configuration files to temp dirs.
//! - Mount the AppRole login mock on a wiremock server.
//!
//! Invariants / Assumptions:
//! - All integration tests using `vaultcfg_cmd()` are hermetic by default.
//! - No Vault variable from the host leaks into the spawned process.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use vault_client::testing::load_fixture;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const VAULT_VARS: &[&str] = &[
    "VAULT_ADDR",
    "VAULT_MOUNTPOINT",
    "VAULT_SKIP_VERIFY",
    "APPROLE_AUTH_NAME",
    "APPROLE_ROLE_ID_PATH",
    "APPROLE_SECRET_ID_PATH",
    "VAULT_K8S_NAME",
    "VAULT_ROLE",
    "SA_TOKEN_PATH",
    "VAULT_CLIENT_CERT",
    "VAULT_CLIENT_CERT_NAME",
    "VAULT_CLIENT_CERT_PASSWORD",
    "RUST_LOG",
];

/// Returns a hermetic `vaultcfg` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - Vault connection variables are cleared so nothing leaks from the host.
pub fn vaultcfg_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("vaultcfg");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    for var in VAULT_VARS {
        cmd.env_remove(var);
    }

    cmd
}

/// Returns a hermetic `vaultcfg` command that authenticates with AppRole
/// against `server`, using credential files written into `dir`.
pub fn vaultcfg_with_approle(server: &MockServer, dir: &Path) -> Command {
    std::fs::write(dir.join("role_id"), "role-123\n").unwrap();
    std::fs::write(dir.join("secret_id"), "secret-456\n").unwrap();

    let mut cmd = vaultcfg_cmd();
    cmd.env("VAULT_ADDR", server.uri())
        .env("VAULT_MOUNTPOINT", "secret")
        .env("APPROLE_ROLE_ID_PATH", dir.join("role_id"))
        .env("APPROLE_SECRET_ID_PATH", dir.join("secret_id"));
    cmd
}

/// Write a configuration file and return its path.
pub fn write_config(dir: &Path, name: &str, content: &serde_json::Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(content).unwrap()).unwrap();
    path
}

/// Mount a successful AppRole login returning `hvs.test-client-token`.
pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/auth/approle/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("auth/login_success.json")),
        )
        .mount(server)
        .await;
}

/// Mount a KV v2 read of `secret/<secret_path>` answering with `fixture`.
pub async fn mount_secret(server: &MockServer, secret_path: &str, fixture: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/secret/data/{secret_path}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture(fixture)))
        .mount(server)
        .await;
}
