//! Connection settings loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `SettingsLoader` for layered settings merging.
//! - Support loading from the `Vault` section, an injected environment, and
//!   direct builder methods.
//! - Build the final `ConnectionSettings` from loaded values.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Section key mapping (delegated to section.rs).
//! - Checking whether credential files exist (see the client strategies).
//!
//! Invariants / Assumptions:
//! - Later sources overwrite earlier ones; call `from_section` before `from_env`
//!   so environment variables take precedence over file values.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.
//! - `build()` expands `{% user_home %}` before enforcing address/mount co-presence.

use secrecy::SecretString;
use std::path::PathBuf;

use super::env::{EnvLookup, ProcessEnv, apply_env, env_var_or_none};
use super::error::SettingsError;
use super::home::{expand_user_home, platform_home};
use super::section::apply_section;
use crate::constants::{ENV_DOTENV_DISABLED, ENV_HOME, ENV_USERPROFILE, VAULT_SECTION};
use crate::settings::{
    AppRoleSettings, CertificateSettings, ConnectionSettings, KubernetesSettings,
};
use crate::tree::ConfigNode;

/// Settings loader that builds `ConnectionSettings` from a file section and
/// the environment.
#[derive(Default)]
pub struct SettingsLoader {
    address: Option<String>,
    mount_point: Option<String>,
    skip_verify: Option<bool>,
    approle_auth_name: Option<String>,
    role_id_path: Option<String>,
    secret_id_path: Option<String>,
    kubernetes_auth_name: Option<String>,
    kubernetes_role: Option<String>,
    kubernetes_token_path: Option<String>,
    certificate_path: Option<String>,
    certificate_role: Option<String>,
    certificate_password: Option<SecretString>,
    home_dir: Option<PathBuf>,
}

impl SettingsLoader {
    /// Create a new settings loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            env_var_or_none(&ProcessEnv, ENV_DOTENV_DISABLED).as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`SettingsError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`SettingsError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, SettingsError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(SettingsError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(SettingsError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(SettingsError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read settings from the `Vault` section node.
    pub fn from_section(mut self, section: &ConfigNode) -> Result<Self, SettingsError> {
        apply_section(&mut self, section)?;
        Ok(self)
    }

    /// Read settings from the `Vault` section of a whole configuration tree.
    ///
    /// A tree without a `Vault` section leaves the loader unchanged.
    pub fn from_tree(self, tree: &ConfigNode) -> Result<Self, SettingsError> {
        match tree.child(VAULT_SECTION) {
            Some(section) => self.from_section(section),
            None => Ok(self),
        }
    }

    /// Read settings from environment variables.
    ///
    /// Also captures the home directory (`HOME`, then `USERPROFILE`) unless
    /// one was set with [`with_home_dir`](Self::with_home_dir).
    pub fn from_env(mut self, env: &impl EnvLookup) -> Result<Self, SettingsError> {
        apply_env(&mut self, env)?;
        if self.home_dir.is_none() {
            self.home_dir = env_var_or_none(env, ENV_HOME)
                .or_else(|| env_var_or_none(env, ENV_USERPROFILE))
                .map(PathBuf::from);
        }
        Ok(self)
    }

    /// Set the directory that replaces `{% user_home %}`.
    pub fn with_home_dir(mut self, home: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(home.into());
        self
    }

    /// Set the Vault address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Set the KV mount point.
    pub fn with_mount_point(mut self, mount_point: impl Into<String>) -> Self {
        self.mount_point = Some(mount_point.into());
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Set the AppRole role ID and secret ID file paths.
    pub fn with_approle_paths(
        mut self,
        role_id_path: impl Into<String>,
        secret_id_path: impl Into<String>,
    ) -> Self {
        self.role_id_path = Some(role_id_path.into());
        self.secret_id_path = Some(secret_id_path.into());
        self
    }

    /// Set the Kubernetes role.
    pub fn with_kubernetes_role(mut self, role: impl Into<String>) -> Self {
        self.kubernetes_role = Some(role.into());
        self
    }

    /// Set the Kubernetes service account token path.
    pub fn with_kubernetes_token_path(mut self, path: impl Into<String>) -> Self {
        self.kubernetes_token_path = Some(path.into());
        self
    }

    /// Set the client certificate path, role and password.
    pub fn with_certificate(
        mut self,
        path: impl Into<String>,
        role: impl Into<String>,
        password: String,
    ) -> Self {
        self.certificate_path = Some(path.into());
        self.certificate_role = Some(role.into());
        self.certificate_password = Some(SecretString::new(password.into()));
        self
    }

    /// Build the final settings.
    pub fn build(self) -> Result<ConnectionSettings, SettingsError> {
        let home = self.home_dir.clone().or_else(platform_home);
        let expand = |raw: Option<String>| {
            raw.map(|raw| expand_user_home(&raw, home.as_deref()))
                .transpose()
        };

        let role_id_path = expand(self.role_id_path)?;
        let secret_id_path = expand(self.secret_id_path)?;
        let token_path = expand(self.kubernetes_token_path)?;
        let certificate_path = expand(self.certificate_path)?;

        let (address, mount_point) = match (self.address, self.mount_point) {
            (None, Some(_)) => {
                return Err(SettingsError::MissingAddress {
                    address: String::new(),
                });
            }
            (Some(_), None) => {
                return Err(SettingsError::MissingMountPoint {
                    mount_point: String::new(),
                });
            }
            (address, mount_point) => (address, mount_point),
        };

        let address = address
            .as_deref()
            .map(validate_and_normalize_address)
            .transpose()?;

        Ok(ConnectionSettings {
            address,
            mount_point,
            skip_verify: self.skip_verify.unwrap_or(false),
            approle: AppRoleSettings {
                auth_name: self.approle_auth_name,
                role_id_path,
                secret_id_path,
            },
            kubernetes: KubernetesSettings {
                auth_name: self.kubernetes_auth_name,
                role: self.kubernetes_role,
                token_path,
            },
            certificate: CertificateSettings {
                path: certificate_path,
                role: self.certificate_role,
                password: self.certificate_password,
            },
        })
    }

    // Internal accessor methods for use by other loader modules

    pub(crate) fn set_address(&mut self, address: Option<String>) {
        self.address = address;
    }

    pub(crate) fn set_mount_point(&mut self, mount_point: Option<String>) {
        self.mount_point = mount_point;
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }

    pub(crate) fn set_approle_auth_name(&mut self, name: Option<String>) {
        self.approle_auth_name = name;
    }

    pub(crate) fn set_role_id_path(&mut self, path: Option<String>) {
        self.role_id_path = path;
    }

    pub(crate) fn set_secret_id_path(&mut self, path: Option<String>) {
        self.secret_id_path = path;
    }

    pub(crate) fn set_kubernetes_auth_name(&mut self, name: Option<String>) {
        self.kubernetes_auth_name = name;
    }

    pub(crate) fn set_kubernetes_role(&mut self, role: Option<String>) {
        self.kubernetes_role = role;
    }

    pub(crate) fn set_kubernetes_token_path(&mut self, path: Option<String>) {
        self.kubernetes_token_path = path;
    }

    pub(crate) fn set_certificate_path(&mut self, path: Option<String>) {
        self.certificate_path = path;
    }

    pub(crate) fn set_certificate_role(&mut self, role: Option<String>) {
        self.certificate_role = role;
    }

    pub(crate) fn set_certificate_password(&mut self, password: Option<SecretString>) {
        self.certificate_password = password;
    }
}

/// Validates and normalizes the Vault address.
///
/// Requirements:
/// - Must be a valid absolute URL
/// - Scheme must be http or https
/// - Must have a host
///
/// Normalization:
/// - Strips trailing slash(es) to prevent double-slash URLs when joining paths
fn validate_and_normalize_address(raw: &str) -> Result<String, SettingsError> {
    let trimmed = raw.trim();

    let parsed = url::Url::parse(trimmed).map_err(|e| SettingsError::InvalidValue {
        var: "vaultAddress".into(),
        message: format!(
            "must be an absolute http(s) URL with a host (e.g. https://vault:8200): {e}"
        ),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(SettingsError::InvalidValue {
            var: "vaultAddress".into(),
            message: format!(
                "scheme must be http or https (e.g. https://vault:8200), got: {scheme}"
            ),
        });
    }

    if parsed.host_str().is_none() {
        return Err(SettingsError::InvalidValue {
            var: "vaultAddress".into(),
            message: "host is required (e.g. https://vault:8200)".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
