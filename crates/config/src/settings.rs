//! Vault connection settings.
//!
//! Responsibilities:
//! - Hold the resolved address, mount point and per-strategy credential bundles.
//! - Answer whether each bundle is complete enough to attempt its strategy.
//!
//! Does NOT handle:
//! - Reading environment variables or the `Vault` section (see `loader`).
//! - Checking that credential files exist (the client strategies do that).
//!
//! Invariants:
//! - Address and mount point are either both set or both unset.
//! - The certificate password is a `SecretString` and never printed by `Debug`.
//! - Paths have already had `{% user_home %}` expanded.

use secrecy::SecretString;
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_APPROLE_AUTH_NAME, DEFAULT_CERT_AUTH_NAME, DEFAULT_K8S_AUTH_NAME,
    DEFAULT_K8S_TOKEN_PATH,
};

/// AppRole credentials: files holding the role ID and secret ID.
#[derive(Debug, Clone, Default)]
pub struct AppRoleSettings {
    pub auth_name: Option<String>,
    pub role_id_path: Option<PathBuf>,
    pub secret_id_path: Option<PathBuf>,
}

impl AppRoleSettings {
    pub fn auth_name(&self) -> &str {
        self.auth_name.as_deref().unwrap_or(DEFAULT_APPROLE_AUTH_NAME)
    }

    pub fn is_complete(&self) -> bool {
        self.role_id_path.is_some() && self.secret_id_path.is_some()
    }
}

/// Kubernetes credentials: a role and the service account token file.
#[derive(Debug, Clone, Default)]
pub struct KubernetesSettings {
    pub auth_name: Option<String>,
    pub role: Option<String>,
    pub token_path: Option<PathBuf>,
}

impl KubernetesSettings {
    pub fn auth_name(&self) -> &str {
        self.auth_name.as_deref().unwrap_or(DEFAULT_K8S_AUTH_NAME)
    }

    /// Configured token path, or the in-cluster default.
    pub fn token_path(&self) -> &Path {
        self.token_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_K8S_TOKEN_PATH))
    }

    pub fn is_complete(&self) -> bool {
        self.role.is_some()
    }
}

/// TLS client certificate credentials.
#[derive(Debug, Clone, Default)]
pub struct CertificateSettings {
    pub path: Option<PathBuf>,
    pub role: Option<String>,
    pub password: Option<SecretString>,
}

impl CertificateSettings {
    pub fn auth_name(&self) -> &str {
        DEFAULT_CERT_AUTH_NAME
    }

    pub fn is_complete(&self) -> bool {
        self.path.is_some() && self.role.is_some() && self.password.is_some()
    }
}

/// Everything needed to reach Vault and authenticate.
#[derive(Debug, Clone, Default)]
pub struct ConnectionSettings {
    /// Normalized `http(s)` URL without trailing slash.
    pub address: Option<String>,
    pub mount_point: Option<String>,
    pub skip_verify: bool,
    pub approle: AppRoleSettings,
    pub kubernetes: KubernetesSettings,
    pub certificate: CertificateSettings,
}

impl ConnectionSettings {
    /// Whether an address is set and at least one strategy has its inputs.
    ///
    /// This only looks at configured values; files are checked later.
    pub fn is_complete(&self) -> bool {
        self.address.is_some()
            && (self.approle.is_complete()
                || self.kubernetes.is_complete()
                || self.certificate.is_complete())
    }

    pub fn mount_point(&self) -> &str {
        self.mount_point.as_deref().unwrap_or_default()
    }
}
