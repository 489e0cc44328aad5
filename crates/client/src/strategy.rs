//! Authentication strategies.
//!
//! Responsibilities:
//! - Check each strategy's preconditions against `ConnectionSettings`.
//! - Read credential files and construct a `VaultClient` bound to the method.
//!
//! Does NOT handle:
//! - Strategy ordering or failure aggregation (see `selector`).
//! - Talking to Vault; the client logs in on its first read.
//!
//! Invariants:
//! - A failed attempt has no side effects and yields a readable reason.
//! - Credential contents never appear in a reason.

use secrecy::{ExposeSecret, SecretString};
use std::path::Path;
use tracing::debug;

use crate::auth::AuthMethod;
use crate::client::VaultClient;
use crate::client::builder::VaultClientBuilder;
use crate::identity::ClientIdentity;
use vault_config::ConnectionSettings;

/// One way of authenticating to Vault.
pub trait AuthStrategy {
    /// Name used in logs and failure summaries.
    fn name(&self) -> &'static str;

    /// Build a client if this strategy's inputs are present and usable.
    fn attempt(&self, settings: &ConnectionSettings) -> Result<VaultClient, String>;
}

/// Service account login with the pod's projected token.
#[derive(Debug, Default, Clone, Copy)]
pub struct KubernetesStrategy;

/// AppRole login with role ID and secret ID files.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppRoleStrategy;

/// TLS client certificate login.
#[derive(Debug, Default, Clone, Copy)]
pub struct CertificateStrategy;

fn builder_for(settings: &ConnectionSettings) -> VaultClientBuilder {
    VaultClient::builder().from_settings(settings)
}

fn finish(builder: VaultClientBuilder, strategy: &str) -> Result<VaultClient, String> {
    builder
        .build()
        .map_err(|e| format!("{strategy} auth: unable to build the Vault client: {e}"))
}

fn read_trimmed(path: &Path) -> std::io::Result<String> {
    std::fs::read_to_string(path).map(|content| content.trim().to_string())
}

impl AuthStrategy for KubernetesStrategy {
    fn name(&self) -> &'static str {
        "Kubernetes"
    }

    fn attempt(&self, settings: &ConnectionSettings) -> Result<VaultClient, String> {
        let k8s = &settings.kubernetes;
        let role = match (&settings.address, &k8s.role) {
            (Some(_), Some(role)) => role,
            _ => {
                return Err("Kubernetes Authentication Failed: vars VaultAddress and KubernetesSaRoleName must be set as env vars or in appsettings file.".to_string());
            }
        };

        let token_path = k8s.token_path();
        if !token_path.is_file() {
            return Err(format!(
                "Kubernetes auth: Unable to find the Service Account token file at {}",
                token_path.display()
            ));
        }
        let jwt = std::fs::read_to_string(token_path).map_err(|e| {
            format!(
                "Kubernetes auth: Unable to read the Service Account token file at {}: {e}",
                token_path.display()
            )
        })?;

        debug!(mount = k8s.auth_name(), role = %role, "Kubernetes credentials found");
        let method = AuthMethod::Kubernetes {
            mount: k8s.auth_name().to_string(),
            role: role.clone(),
            jwt: SecretString::new(jwt.trim().into()),
        };
        finish(builder_for(settings).auth_method(method), self.name())
    }
}

impl AuthStrategy for AppRoleStrategy {
    fn name(&self) -> &'static str {
        "AppRole"
    }

    fn attempt(&self, settings: &ConnectionSettings) -> Result<VaultClient, String> {
        let approle = &settings.approle;
        let (role_id_path, secret_id_path) =
            match (&settings.address, &approle.role_id_path, &approle.secret_id_path) {
                (Some(_), Some(role_id), Some(secret_id)) => (role_id, secret_id),
                _ => {
                    return Err("AppRole Authentication Failed: vars VaultAddress,AppRoleRoleIdPath and AppRoleSecretIdPath must be set as env vars or in appsettings file.".to_string());
                }
            };

        if !role_id_path.is_file() || !secret_id_path.is_file() {
            return Err("AppRole auth: Either Secret or Role ID file does not exist".to_string());
        }
        let role_id = read_trimmed(role_id_path)
            .map_err(|e| format!("AppRole auth: Unable to read the Role ID file: {e}"))?;
        let secret_id = read_trimmed(secret_id_path)
            .map_err(|e| format!("AppRole auth: Unable to read the Secret ID file: {e}"))?;

        debug!(mount = approle.auth_name(), "AppRole credentials found");
        let method = AuthMethod::AppRole {
            mount: approle.auth_name().to_string(),
            role_id: SecretString::new(role_id.into()),
            secret_id: SecretString::new(secret_id.into()),
        };
        finish(builder_for(settings).auth_method(method), self.name())
    }
}

impl AuthStrategy for CertificateStrategy {
    fn name(&self) -> &'static str {
        "Certificate"
    }

    fn attempt(&self, settings: &ConnectionSettings) -> Result<VaultClient, String> {
        let cert = &settings.certificate;
        let (password, role) = match (&settings.address, &cert.password, &cert.role) {
            (Some(_), Some(password), Some(role)) if !password.expose_secret().is_empty() => {
                (password, role)
            }
            _ => {
                return Err("Certificate Authentication Failed: vars VaultAddress, Certificate Password and Certificate role name must be set as env vars or in appsettings file.".to_string());
            }
        };

        let path = match &cert.path {
            Some(path) if path.is_file() => path,
            other => {
                let shown = other
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                return Err(format!(
                    "Certificate auth: Unable to find the Certificate at {shown}"
                ));
            }
        };

        let bundle = std::fs::read(path)
            .map_err(|e| format!("Certificate auth: Unable to read the Certificate: {e}"))?;
        let identity = ClientIdentity::from_bundle(&bundle, password.expose_secret())
            .map_err(|e| format!("Certificate auth: {e}"))?;

        debug!(mount = cert.auth_name(), role = %role, "Certificate credentials found");
        let method = AuthMethod::Certificate {
            mount: cert.auth_name().to_string(),
            role: role.clone(),
        };
        finish(
            builder_for(settings).auth_method(method).identity(identity),
            self.name(),
        )
    }
}
