//! Secret store seam used by the resolution engine.
//!
//! Responsibilities:
//! - Define the two lookups the engine needs (`read_field`, `read_all`).
//! - Classify lookup failures into the four `StoreFault` classes.
//! - Implement the seam for `VaultClient` over KV v2.
//!
//! Invariants:
//! - A missing path is `StoreFault::NotFound`; a missing field on an existing
//!   path is `Ok(None)`.
//! - String values are returned verbatim, `null` as an empty string, and any
//!   other JSON value in its compact rendering.

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::client::VaultClient;

/// Why a secret lookup failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreFault {
    #[error("{0}")]
    Connectivity(String),

    #[error("{0}")]
    PermissionDenied(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Other(String),
}

/// Read access to a KV secret store.
///
/// Methods take `&mut self` because the first call may log in.
#[allow(async_fn_in_trait)]
pub trait SecretStore {
    /// Read one field of the secret at `path` under `mount`.
    async fn read_field(
        &mut self,
        path: &str,
        field: &str,
        mount: &str,
    ) -> Result<Option<String>, StoreFault>;

    /// Read every field of the secret at `path` under `mount`.
    async fn read_all(&mut self, path: &str, mount: &str)
    -> Result<BTreeMap<String, String>, StoreFault>;
}

/// Render a KV value the way it is spliced into configuration.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl SecretStore for VaultClient {
    async fn read_field(
        &mut self,
        path: &str,
        field: &str,
        mount: &str,
    ) -> Result<Option<String>, StoreFault> {
        let data = self
            .read_secret(path, mount)
            .await
            .map_err(|e| e.fault())?;
        Ok(data.get(field).map(render_value))
    }

    async fn read_all(
        &mut self,
        path: &str,
        mount: &str,
    ) -> Result<BTreeMap<String, String>, StoreFault> {
        let data = self
            .read_secret(path, mount)
            .await
            .map_err(|e| e.fault())?;
        Ok(data
            .iter()
            .map(|(key, value)| (key.clone(), render_value(value)))
            .collect())
    }
}
