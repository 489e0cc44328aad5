//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map resolution, configuration and lint errors to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-6 are reserved for specific error categories.

use vault_config::{SettingsError, TreeError};
use vault_resolver::ResolveError;

/// Structured exit codes for vaultcfg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure, lint failures.
    GeneralError = 1,

    /// Authentication failure - no strategy could be used.
    ///
    /// Scripts should check the credential files and role names.
    AuthenticationFailed = 2,

    /// Connection error - Vault unreachable or timed out.
    ///
    /// Scripts may retry with exponential backoff.
    ConnectionError = 3,

    /// Missing secret - path or field absent in Vault.
    NotFound = 4,

    /// Validation error - malformed placeholder, bad settings, incomplete
    /// Vault configuration or unparsable configuration file.
    ///
    /// Scripts should fix the input and not retry.
    ValidationError = 5,

    /// Permission denied - the token's policy does not allow the read.
    PermissionDenied = 6,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }

    /// Returns true if this exit code indicates a retryable condition.
    #[allow(dead_code)]
    pub const fn is_retryable(self) -> bool {
        matches!(self, ExitCode::ConnectionError)
    }
}

impl From<&ResolveError> for ExitCode {
    fn from(err: &ResolveError) -> Self {
        match err {
            ResolveError::Settings(inner) => Self::from(inner),
            ResolveError::IncompleteVaultConfiguration => ExitCode::ValidationError,
            ResolveError::AuthenticationExhausted(_) => ExitCode::AuthenticationFailed,
            ResolveError::Connectivity { .. } => ExitCode::ConnectionError,
            ResolveError::PermissionDenied { .. } => ExitCode::PermissionDenied,
            ResolveError::MalformedPlaceholder { .. }
            | ResolveError::MalformedSecretKey { .. }
            | ResolveError::UnknownPlaceholderKind { .. } => ExitCode::ValidationError,
            ResolveError::MissingSecret { .. } => ExitCode::NotFound,
            ResolveError::SecretLookupFailed { .. } => ExitCode::GeneralError,
        }
    }
}

impl From<&SettingsError> for ExitCode {
    fn from(err: &SettingsError) -> Self {
        match err {
            SettingsError::DotenvParse { .. }
            | SettingsError::DotenvIo { .. }
            | SettingsError::DotenvUnknown => ExitCode::GeneralError,
            _ => ExitCode::ValidationError,
        }
    }
}

impl From<&TreeError> for ExitCode {
    fn from(err: &TreeError) -> Self {
        match err {
            TreeError::Io { .. } => ExitCode::GeneralError,
            _ => ExitCode::ValidationError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(err) = cause.downcast_ref::<ResolveError>() {
                return ExitCode::from(err);
            }
            if let Some(err) = cause.downcast_ref::<SettingsError>() {
                return ExitCode::from(err);
            }
            if let Some(err) = cause.downcast_ref::<TreeError>() {
                return ExitCode::from(err);
            }
        }

        ExitCode::GeneralError
    }
}
