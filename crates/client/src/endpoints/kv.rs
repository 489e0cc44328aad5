//! KV version 2 secret endpoints.

use reqwest::Client;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::endpoints::{api_url, send_request};
use crate::error::{ClientError, Result};
use crate::models::KvReadResponse;

/// Header carrying the client token.
pub const VAULT_TOKEN_HEADER: &str = "X-Vault-Token";

/// Read the latest version of the secret at `path` under `mount`.
///
/// # Errors
///
/// Returns `ClientError::ApiError` for non-2xx responses and
/// `ClientError::NotFound` when the version has no data (deleted).
pub async fn read_kv2(
    client: &Client,
    address: &str,
    token: &str,
    mount: &str,
    path: &str,
) -> Result<BTreeMap<String, Value>> {
    debug!(mount, path, "Reading KV secret");

    let url = api_url(address, [mount, "data", path])?;
    let builder = client.get(url).header(VAULT_TOKEN_HEADER, token);
    let response = send_request(builder).await?;

    let body: KvReadResponse = response.json().await?;
    body.data
        .and_then(|data| data.data)
        .ok_or_else(|| ClientError::NotFound(format!("{mount}/{path}")))
}
