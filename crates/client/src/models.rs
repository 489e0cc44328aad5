//! Vault API response models.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Response body of `POST /v1/auth/{mount}/login`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub auth: Option<AuthInfo>,
}

/// The `auth` block of a login response.
#[derive(Deserialize)]
pub struct AuthInfo {
    pub client_token: String,
    #[serde(default)]
    pub lease_duration: u64,
    #[serde(default)]
    pub policies: Vec<String>,
}

impl std::fmt::Debug for AuthInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthInfo")
            .field("client_token", &"[REDACTED]")
            .field("lease_duration", &self.lease_duration)
            .field("policies", &self.policies)
            .finish()
    }
}

/// Response body of `GET /v1/{mount}/data/{path}` (KV version 2).
#[derive(Debug, Deserialize)]
pub struct KvReadResponse {
    pub data: Option<KvData>,
}

/// The outer `data` block; the secret itself is in `data.data`.
#[derive(Debug, Deserialize)]
pub struct KvData {
    pub data: Option<BTreeMap<String, Value>>,
}

/// Error body returned by Vault on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct VaultErrors {
    #[serde(default)]
    pub errors: Vec<String>,
}
