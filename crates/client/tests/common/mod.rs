//! Common test utilities for integration tests.
//!
//! This module provides shared helper functions and re-exports commonly used
//! types for testing the Vault client. All integration tests should use
//! these utilities to ensure consistency.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - All fixture files must be valid JSON
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)
//! - Test-specific assertions or test logic

use secrecy::SecretString;
use wiremock::matchers::{method, path};

#[allow(unused_imports)]
pub use vault_client::testing::load_fixture;

// Re-export commonly used types for test convenience
// These are used via `use common::*;` in test files
#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use vault_client::{AuthMethod, VaultClient, endpoints};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// AppRole method with fixed test credentials.
#[allow(dead_code)]
pub fn approle_method() -> AuthMethod {
    AuthMethod::AppRole {
        mount: "approle".to_string(),
        role_id: SecretString::new("test-role-id".into()),
        secret_id: SecretString::new("test-secret-id".into()),
    }
}

/// Client pointed at the mock server using AppRole login.
#[allow(dead_code)]
pub fn approle_client(server: &MockServer) -> VaultClient {
    VaultClient::builder()
        .address(server.uri())
        .auth_method(approle_method())
        .build()
        .expect("client should build")
}

/// AppRole client whose login succeeds with `auth/login_success.json`.
#[allow(dead_code)]
pub async fn logged_in_client(server: &MockServer) -> VaultClient {
    Mock::given(method("POST"))
        .and(path("/v1/auth/approle/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("auth/login_success.json")),
        )
        .mount(server)
        .await;
    approle_client(server)
}
