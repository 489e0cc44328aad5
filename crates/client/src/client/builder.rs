//! Client builder for constructing [`VaultClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating required configuration (address, auth method)
//! - Normalizing the address (removing trailing slashes)
//! - Configuring the underlying HTTP client (timeouts, TLS verification, identity)
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by [`VaultClient`] methods)
//! - Token management (handled by [`SessionManager`] in `auth.rs`)
//!
//! # Invariants
//! - `address` and `auth_method` are required and must be provided before calling `build()`
//! - The address is always normalized to have no trailing slashes
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning

use std::time::Duration;

use crate::auth::{AuthMethod, SessionManager};
use crate::client::VaultClient;
use crate::error::{ClientError, Result};
use crate::identity::ClientIdentity;
use vault_config::ConnectionSettings;
use vault_config::constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS};

/// Builder for creating a new [`VaultClient`].
pub struct VaultClientBuilder {
    address: Option<String>,
    auth_method: Option<AuthMethod>,
    skip_verify: bool,
    timeout: Duration,
    identity: Option<ClientIdentity>,
}

impl Default for VaultClientBuilder {
    fn default() -> Self {
        Self {
            address: None,
            auth_method: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            identity: None,
        }
    }
}

impl VaultClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Vault address, e.g. `https://vault:8200`.
    ///
    /// Trailing slashes will be automatically removed.
    pub fn address(mut self, address: String) -> Self {
        self.address = Some(address);
        self
    }

    /// Set the authentication method.
    pub fn auth_method(mut self, method: AuthMethod) -> Self {
        self.auth_method = Some(method);
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this in development or testing environments. Disabling TLS
    /// verification makes the connection vulnerable to man-in-the-middle attacks.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Attach a TLS client identity (certificate authentication).
    pub fn identity(mut self, identity: ClientIdentity) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Take the address and TLS settings from connection settings.
    pub fn from_settings(mut self, settings: &ConnectionSettings) -> Self {
        self.address = settings.address.clone();
        self.skip_verify = settings.skip_verify;
        self
    }

    /// Normalize an address by removing trailing slashes.
    fn normalize_address(address: String) -> String {
        address.trim_end_matches('/').to_string()
    }

    /// Build the [`VaultClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `address` was not provided.
    /// Returns [`ClientError::AuthFailed`] if `auth_method` was not provided.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<VaultClient> {
        let address = self
            .address
            .ok_or_else(|| ClientError::InvalidUrl("address is required".to_string()))?;
        let address = Self::normalize_address(address);

        let auth_method = self
            .auth_method
            .ok_or_else(|| ClientError::AuthFailed("auth_method is required".to_string()))?;

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            if address.starts_with("https://") {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                // No TLS layer on plain HTTP.
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        if let Some(identity) = self.identity {
            http_builder = http_builder.identity(identity.into_inner());
        }

        let http = http_builder.build()?;

        Ok(VaultClient {
            http,
            address,
            session_manager: SessionManager::new(auth_method),
        })
    }
}
