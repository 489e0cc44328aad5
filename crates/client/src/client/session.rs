//! Client-level session management helpers.
//!
//! # Invariants
//! - [`get_auth_token()`] requires `&mut self` because it may trigger a login call
//! - A token inside the expiry buffer is replaced by logging in again

use crate::client::VaultClient;
use crate::endpoints;
use crate::error::Result;

impl VaultClient {
    /// Get the current client token, logging in if necessary.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ClientError::AuthFailed`] if login fails.
    pub(crate) async fn get_auth_token(&mut self) -> Result<String> {
        if !self.session_manager.needs_login()
            && let Some(token) = self.session_manager.get_token()
        {
            return Ok(token.to_string());
        }
        self.login().await
    }

    /// Log in with the configured method, store the issued token and return it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ClientError::AuthFailed`] if Vault rejects the credentials.
    pub async fn login(&mut self) -> Result<String> {
        let (token, lease) =
            endpoints::login(&self.http, &self.address, self.session_manager.auth_method())
                .await?;

        tracing::info!(
            method = self.session_manager.auth_method().name(),
            lease_seconds = lease,
            "Authenticated to Vault"
        );
        self.session_manager.set_client_token(token.clone(), Some(lease));
        Ok(token)
    }
}
