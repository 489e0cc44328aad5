//! Error types for the Vault client.

use thiserror::Error;

use crate::store::StoreFault;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during Vault client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Login was rejected.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Transport-level error (connect, TLS, timeout, body read).
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-success response from Vault.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
    },

    /// The secret exists but holds no data (deleted or destroyed version).
    #[error("Secret not found: {0}")]
    NotFound(String),

    /// Invalid response format from Vault.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Client certificate bundle could not be turned into a TLS identity.
    #[error("Invalid client identity: {0}")]
    InvalidIdentity(String),
}

impl ClientError {
    /// Whether the error was caused by the connection rather than by Vault.
    pub fn is_transport_error(&self) -> bool {
        match self {
            Self::HttpError(e) => e.is_connect() || e.is_timeout() || e.is_request() || e.is_body(),
            _ => false,
        }
    }

    /// Classify this error for secret lookups.
    ///
    /// 403 is permission denied and 404 is not found. Other statuses are
    /// permission denied only when Vault says so in the message.
    pub fn fault(&self) -> StoreFault {
        let detail = self.to_string();
        match self {
            Self::ApiError { status: 403, .. } => StoreFault::PermissionDenied(detail),
            Self::ApiError { status: 404, .. } | Self::NotFound(_) => StoreFault::NotFound(detail),
            Self::ApiError { message, .. }
                if message.to_ascii_lowercase().contains("permission denied") =>
            {
                StoreFault::PermissionDenied(detail)
            }
            _ if self.is_transport_error() => StoreFault::Connectivity(detail),
            _ => StoreFault::Other(detail),
        }
    }
}
