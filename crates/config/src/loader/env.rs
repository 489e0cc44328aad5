//! Environment variable lookup for Vault connection settings.
//!
//! Responsibilities:
//! - Define the `EnvLookup` seam through which all environment reads flow.
//! - Apply environment variable values to a `SettingsLoader` instance.
//! - Filter empty/whitespace values so they never override file settings.
//!
//! Does NOT handle:
//! - Reading the `Vault` section of the settings file (see section.rs).
//! - Validating the final settings (see builder.rs).
//! - .env file loading (handled by SettingsLoader::load_dotenv).
//!
//! Invariants:
//! - Environment variables take precedence over file settings.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - `ProcessEnv` is the only place in the library that reads `std::env`.

use secrecy::SecretString;
use std::collections::HashMap;
use tracing::warn;

use super::builder::SettingsLoader;
use super::error::SettingsError;
use crate::constants::{
    ENV_APPROLE_AUTH_NAME, ENV_APPROLE_ROLE_ID_PATH, ENV_APPROLE_SECRET_ID_PATH, ENV_CLIENT_CERT,
    ENV_CLIENT_CERT_NAME, ENV_CLIENT_CERT_PASSWORD, ENV_K8S_AUTH_NAME, ENV_K8S_ROLE,
    ENV_SA_TOKEN_PATH, ENV_VAULT_ADDR, ENV_VAULT_MOUNTPOINT, ENV_VAULT_SKIP_VERIFY,
};

/// A source of environment-style key/value pairs.
///
/// Implementations return the raw value; callers go through
/// [`env_var_or_none`] to get the empty-means-unset behaviour.
pub trait EnvLookup {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads from the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvLookup for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvLookup for HashMap<&str, &str> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| (*v).to_string())
    }
}

/// Adapts a closure into an [`EnvLookup`].
pub struct FnEnv<F>(pub F);

impl<F> EnvLookup for FnEnv<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }
}

/// Read a variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(env: &impl EnvLookup, key: &str) -> Option<String> {
    env.var(key).and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse a boolean flag the way deployments write them.
///
/// Only `true` and `1` enable the flag. Any other value disables it; values
/// other than `false` and `0` are logged.
pub(crate) fn parse_flag(var: &str, raw: &str) -> bool {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => true,
        "false" | "0" => false,
        _ => {
            warn!(var, value = raw, "Unrecognized boolean value, treating as false");
            false
        }
    }
}

/// Apply environment variable configuration to the loader.
///
/// Each variable replaces the file value wholesale when it is set.
pub fn apply_env(loader: &mut SettingsLoader, env: &impl EnvLookup) -> Result<(), SettingsError> {
    if let Some(address) = env_var_or_none(env, ENV_VAULT_ADDR) {
        loader.set_address(Some(address));
    }
    if let Some(mount_point) = env_var_or_none(env, ENV_VAULT_MOUNTPOINT) {
        loader.set_mount_point(Some(mount_point));
    }
    if let Some(skip) = env_var_or_none(env, ENV_VAULT_SKIP_VERIFY) {
        loader.set_skip_verify(Some(parse_flag(ENV_VAULT_SKIP_VERIFY, &skip)));
    }

    // AppRole
    if let Some(name) = env_var_or_none(env, ENV_APPROLE_AUTH_NAME) {
        loader.set_approle_auth_name(Some(name));
    }
    if let Some(path) = env_var_or_none(env, ENV_APPROLE_ROLE_ID_PATH) {
        loader.set_role_id_path(Some(path));
    }
    if let Some(path) = env_var_or_none(env, ENV_APPROLE_SECRET_ID_PATH) {
        loader.set_secret_id_path(Some(path));
    }

    // Kubernetes
    if let Some(name) = env_var_or_none(env, ENV_K8S_AUTH_NAME) {
        loader.set_kubernetes_auth_name(Some(name));
    }
    if let Some(role) = env_var_or_none(env, ENV_K8S_ROLE) {
        loader.set_kubernetes_role(Some(role));
    }
    if let Some(path) = env_var_or_none(env, ENV_SA_TOKEN_PATH) {
        loader.set_kubernetes_token_path(Some(path));
    }

    // Certificate
    if let Some(path) = env_var_or_none(env, ENV_CLIENT_CERT) {
        loader.set_certificate_path(Some(path));
    }
    if let Some(role) = env_var_or_none(env, ENV_CLIENT_CERT_NAME) {
        loader.set_certificate_role(Some(role));
    }
    if let Some(password) = env_var_or_none(env, ENV_CLIENT_CERT_PASSWORD) {
        loader.set_certificate_password(Some(SecretString::new(password.into())));
    }

    Ok(())
}
