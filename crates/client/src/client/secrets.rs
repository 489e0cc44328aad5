//! KV secret reads.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::client::VaultClient;
use crate::endpoints;
use crate::error::Result;

impl VaultClient {
    /// Read every field of the secret at `path` under the KV v2 `mount`.
    ///
    /// Logs in first when no valid token is held.
    pub async fn read_secret(&mut self, path: &str, mount: &str) -> Result<BTreeMap<String, Value>> {
        let token = self.get_auth_token().await?;
        endpoints::read_kv2(&self.http, &self.address, &token, mount, path).await
    }
}
