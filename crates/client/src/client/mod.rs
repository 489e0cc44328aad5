//! Vault client and secret read methods.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `session`: Token retrieval and lazy login (private module)
//! - `secrets`: KV secret reads (private module)
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Low-level token storage (delegated to [`crate::auth::SessionManager`])
//! - Choosing an authentication method (see [`crate::selector`])
//!
//! # Invariants
//! - Constructing a client performs no network I/O; the first read logs in.
//! - Requests are single-attempt; failures surface to the caller unchanged.

pub mod builder;
mod secrets;
mod session;

use crate::auth::SessionManager;

/// Vault HTTP client bound to one authentication method.
///
/// # Creating a Client
///
/// ```rust,ignore
/// use vault_client::{AuthMethod, VaultClient};
///
/// let client = VaultClient::builder()
///     .address("https://vault:8200".to_string())
///     .auth_method(AuthMethod::Certificate {
///         mount: "cert".to_string(),
///         role: "web".to_string(),
///     })
///     .identity(identity)
///     .build()?;
/// ```
#[derive(Debug)]
pub struct VaultClient {
    pub(crate) http: reqwest::Client,
    pub(crate) address: String,
    pub(crate) session_manager: SessionManager,
}

impl VaultClient {
    /// Create a new client builder.
    pub fn builder() -> builder::VaultClientBuilder {
        builder::VaultClientBuilder::new()
    }

    /// Get the Vault address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Name of the configured authentication method.
    pub fn auth_method_name(&self) -> &'static str {
        self.session_manager.auth_method().name()
    }
}
