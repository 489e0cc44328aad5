//! Reading the `Vault` section of the settings tree.
//!
//! Responsibilities:
//! - Map the documented `Vault` section keys onto `SettingsLoader` fields.
//!
//! Does NOT handle:
//! - Environment variables (see env.rs), which are applied afterwards.
//!
//! Invariants:
//! - Keys are matched case-insensitively.
//! - Empty or whitespace-only file values are treated as unset, like env values.

use secrecy::SecretString;

use super::builder::SettingsLoader;
use super::env::parse_flag;
use super::error::SettingsError;
use crate::constants::{
    KEY_APPROLE_AUTH_NAME, KEY_CERTIFICATE_PASSWORD, KEY_CERTIFICATE_PATH,
    KEY_CERTIFICATE_ROLE_NAME, KEY_K8S_AUTH_NAME, KEY_K8S_ROLE_NAME, KEY_K8S_TOKEN_PATH,
    KEY_MOUNT_POINT, KEY_ROLE_ID_PATH, KEY_SECRET_ID_PATH, KEY_SKIP_VERIFY, KEY_VAULT_ADDRESS,
};
use crate::tree::ConfigNode;

fn section_value(section: &ConfigNode, key: &str) -> Option<String> {
    section
        .child(key)
        .and_then(ConfigNode::value)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Apply the `Vault` section values to the loader.
pub fn apply_section(loader: &mut SettingsLoader, section: &ConfigNode) -> Result<(), SettingsError> {
    if let Some(address) = section_value(section, KEY_VAULT_ADDRESS) {
        loader.set_address(Some(address));
    }
    if let Some(mount_point) = section_value(section, KEY_MOUNT_POINT) {
        loader.set_mount_point(Some(mount_point));
    }
    if let Some(skip) = section_value(section, KEY_SKIP_VERIFY) {
        loader.set_skip_verify(Some(parse_flag(KEY_SKIP_VERIFY, &skip)));
    }

    if let Some(name) = section_value(section, KEY_APPROLE_AUTH_NAME) {
        loader.set_approle_auth_name(Some(name));
    }
    if let Some(path) = section_value(section, KEY_ROLE_ID_PATH) {
        loader.set_role_id_path(Some(path));
    }
    if let Some(path) = section_value(section, KEY_SECRET_ID_PATH) {
        loader.set_secret_id_path(Some(path));
    }

    if let Some(name) = section_value(section, KEY_K8S_AUTH_NAME) {
        loader.set_kubernetes_auth_name(Some(name));
    }
    if let Some(role) = section_value(section, KEY_K8S_ROLE_NAME) {
        loader.set_kubernetes_role(Some(role));
    }
    if let Some(path) = section_value(section, KEY_K8S_TOKEN_PATH) {
        loader.set_kubernetes_token_path(Some(path));
    }

    if let Some(path) = section_value(section, KEY_CERTIFICATE_PATH) {
        loader.set_certificate_path(Some(path));
    }
    if let Some(role) = section_value(section, KEY_CERTIFICATE_ROLE_NAME) {
        loader.set_certificate_role(Some(role));
    }
    if let Some(password) = section_value(section, KEY_CERTIFICATE_PASSWORD) {
        loader.set_certificate_password(Some(SecretString::new(password.into())));
    }

    Ok(())
}
