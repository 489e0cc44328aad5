//! Authentication methods and session management.

use secrecy::{ExposeSecret, SecretString};
use std::time::{Duration, Instant};
use vault_config::constants::DEFAULT_EXPIRY_BUFFER_SECS;

/// How the client logs in to Vault.
#[derive(Debug, Clone)]
pub enum AuthMethod {
    /// Kubernetes service account login.
    Kubernetes {
        mount: String,
        role: String,
        jwt: SecretString,
    },
    /// AppRole login with a role ID and secret ID.
    AppRole {
        mount: String,
        role_id: SecretString,
        secret_id: SecretString,
    },
    /// TLS certificate login; the identity lives on the HTTP client.
    Certificate { mount: String, role: String },
}

impl AuthMethod {
    /// Short name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Kubernetes { .. } => "kubernetes",
            Self::AppRole { .. } => "approle",
            Self::Certificate { .. } => "cert",
        }
    }
}

/// Manages the Vault client token with lease-based renewal.
#[derive(Debug)]
pub struct SessionManager {
    auth_method: AuthMethod,
    client_token: Option<ClientToken>,
}

/// Client token with expiry information.
#[derive(Debug, Clone)]
struct ClientToken {
    value: SecretString,
    expires_at: Option<Instant>,
    expiry_buffer_seconds: u64,
}

impl ClientToken {
    /// The buffer is capped at half the lease so a short lease is still reused.
    fn new(value: SecretString, lease_seconds: Option<u64>) -> Self {
        Self {
            value,
            expires_at: lease_seconds.map(|lease| Instant::now() + Duration::from_secs(lease)),
            expiry_buffer_seconds: lease_seconds.map_or(DEFAULT_EXPIRY_BUFFER_SECS, |lease| {
                DEFAULT_EXPIRY_BUFFER_SECS.min(lease / 2)
            }),
        }
    }

    /// Check if the token will expire within the buffer window.
    fn will_expire_soon(&self) -> bool {
        self.expires_at
            .map(|exp| {
                let remaining = exp.saturating_duration_since(Instant::now());
                remaining.is_zero() || remaining < Duration::from_secs(self.expiry_buffer_seconds)
            })
            .unwrap_or(false)
    }
}

impl SessionManager {
    pub fn new(auth_method: AuthMethod) -> Self {
        Self {
            auth_method,
            client_token: None,
        }
    }

    pub fn auth_method(&self) -> &AuthMethod {
        &self.auth_method
    }

    /// Token to send in `X-Vault-Token`, if one is available.
    pub fn get_token(&self) -> Option<&str> {
        self.client_token.as_ref().map(|t| t.value.expose_secret())
    }

    /// Store the token received from a login response.
    ///
    /// A lease of `None` or `0` means the token does not expire.
    pub fn set_client_token(&mut self, token: String, lease_seconds: Option<u64>) {
        self.client_token = Some(ClientToken::new(
            SecretString::new(token.into()),
            lease_seconds.filter(|lease| *lease > 0),
        ));
    }

    /// Whether a login is required before the next request.
    pub fn needs_login(&self) -> bool {
        self.client_token
            .as_ref()
            .map(ClientToken::will_expire_soon)
            .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approle() -> AuthMethod {
        AuthMethod::AppRole {
            mount: "approle".to_string(),
            role_id: SecretString::new("role-id-value".into()),
            secret_id: SecretString::new("secret-id-value".into()),
        }
    }

    #[test]
    fn test_login_needed_until_token_set() {
        let mut manager = SessionManager::new(approle());
        assert!(manager.needs_login());
        assert!(manager.get_token().is_none());

        manager.set_client_token("hvs.issued".to_string(), Some(3600));
        assert!(!manager.needs_login());
        assert_eq!(manager.get_token(), Some("hvs.issued"));
    }

    #[test]
    fn test_zero_lease_never_expires() {
        let mut manager = SessionManager::new(approle());
        manager.set_client_token("hvs.root".to_string(), Some(0));
        assert!(!manager.needs_login());
    }

    #[test]
    fn test_short_lease_is_reused() {
        let mut manager = SessionManager::new(approle());
        manager.set_client_token("hvs.short".to_string(), Some(30));
        assert!(!manager.needs_login());

        manager.set_client_token("hvs.shorter".to_string(), Some(5));
        assert!(!manager.needs_login());
    }

    #[test]
    fn test_expired_lease_needs_login() {
        let mut manager = SessionManager::new(approle());
        manager.set_client_token("hvs.brief".to_string(), Some(1));
        std::thread::sleep(Duration::from_millis(1100));
        assert!(manager.needs_login());
    }

    #[test]
    fn test_debug_hides_credentials_and_token() {
        let mut manager = SessionManager::new(approle());
        manager.set_client_token("hvs.secret-token".to_string(), Some(3600));
        let debug = format!("{manager:?}");
        assert!(!debug.contains("role-id-value"));
        assert!(!debug.contains("secret-id-value"));
        assert!(!debug.contains("hvs.secret-token"));
        assert!(debug.contains("AppRole"));
    }

    #[test]
    fn test_method_names() {
        assert_eq!(approle().name(), "approle");
        let cert = AuthMethod::Certificate {
            mount: "cert".to_string(),
            role: "web".to_string(),
        };
        assert_eq!(cert.name(), "cert");
    }
}
