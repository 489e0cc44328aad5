//! Error types for connection settings loading.
//!
//! Responsibilities:
//! - Define error variants for all settings loading failures.
//!
//! Does NOT handle:
//! - Placeholder grammar errors (see placeholder.rs).
//! - Errors raised while talking to Vault (see the client crate).
//!
//! Invariants:
//! - All error variants include context for debugging (variable names, values).
//! - Errors NEVER include secret values (certificate passwords, IDs).
//! - Dotenv errors NEVER include raw .env line contents.

use std::io::ErrorKind;
use thiserror::Error;

/// Errors that can occur while building [`ConnectionSettings`](crate::ConnectionSettings).
#[derive(Error, Debug)]
pub enum SettingsError {
    /// A mount point is configured without a Vault address.
    #[error("Vault address must be set, got '{address}'")]
    MissingAddress { address: String },

    /// A Vault address is configured without a mount point.
    #[error("Vault mountpoint must be set, got '{mount_point}'")]
    MissingMountPoint { mount_point: String },

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Unable to determine the user home directory")]
    HomeDirUnavailable,

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

impl SettingsError {
    /// Whether this is a violation of the address/mount point co-presence rule.
    pub fn is_co_presence_violation(&self) -> bool {
        matches!(
            self,
            Self::MissingAddress { .. } | Self::MissingMountPoint { .. }
        )
    }
}
