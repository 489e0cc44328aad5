//! Resolution error taxonomy.
//!
//! Every variant is fatal. Messages name paths, keys and mount points but
//! never secret values.

use thiserror::Error;
use vault_client::{AuthenticationExhausted, StoreFault};
use vault_config::SettingsError;

/// Why a configuration could not be resolved.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Placeholders were found but the Vault configuration is not complete.")]
    IncompleteVaultConfiguration,

    #[error(transparent)]
    AuthenticationExhausted(#[from] AuthenticationExhausted),

    #[error("Unable to connect to Vault: {detail}")]
    Connectivity { detail: String },

    #[error("Access to vault was denied, is the mountpoint correctly configured? (mount point '{mount_point}')")]
    PermissionDenied { mount_point: String },

    #[error("Could not parse the content of placeholder {placeholder} in config section {section}")]
    MalformedPlaceholder { section: String, placeholder: String },

    #[error("Could not parse placeholder secret key '{key}' in config section {section}")]
    MalformedSecretKey { section: String, key: String },

    #[error("Unknown secret type '{kind}' in placeholder '{placeholder}'")]
    UnknownPlaceholderKind { kind: String, placeholder: String },

    #[error("{}", missing_message(.path, .field.as_deref()))]
    MissingSecret { path: String, field: Option<String> },

    #[error("Unable to load secret/dictionary from vault corresponding to key '{key}': {detail}")]
    SecretLookupFailed { key: String, detail: String },
}

fn missing_message(path: &str, field: Option<&str>) -> String {
    match field {
        Some(field) => format!("Didn't find the required field {field} at vault path {path}"),
        None => format!("Didn't find any secret at vault path {path}"),
    }
}

impl ResolveError {
    /// Map a store fault for the lookup of `key` (`path` plus optional `field`).
    pub(crate) fn from_fault(
        fault: StoreFault,
        key: &str,
        path: &str,
        field: Option<&str>,
        mount_point: &str,
    ) -> Self {
        match fault {
            StoreFault::Connectivity(detail) => Self::Connectivity { detail },
            StoreFault::PermissionDenied(_) => Self::PermissionDenied {
                mount_point: mount_point.to_string(),
            },
            StoreFault::NotFound(_) => Self::MissingSecret {
                path: path.to_string(),
                field: field.map(str::to_string),
            },
            StoreFault::Other(detail) => Self::SecretLookupFailed {
                key: key.to_string(),
                detail,
            },
        }
    }

    /// Whether the placeholder text itself is at fault.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::MalformedPlaceholder { .. }
                | Self::MalformedSecretKey { .. }
                | Self::UnknownPlaceholderKind { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_secret_messages() {
        let field = ResolveError::MissingSecret {
            path: "mssql".to_string(),
            field: Some("password".to_string()),
        };
        assert_eq!(
            field.to_string(),
            "Didn't find the required field password at vault path mssql"
        );

        let dict = ResolveError::MissingSecret {
            path: "mssql/clients".to_string(),
            field: None,
        };
        assert_eq!(dict.to_string(), "Didn't find any secret at vault path mssql/clients");
    }

    #[test]
    fn test_fault_mapping() {
        let denied = ResolveError::from_fault(
            StoreFault::PermissionDenied("403".to_string()),
            "db:pw",
            "db",
            Some("pw"),
            "kv",
        );
        assert!(matches!(denied, ResolveError::PermissionDenied { ref mount_point } if mount_point == "kv"));

        let other = ResolveError::from_fault(
            StoreFault::Other("boom".to_string()),
            "db:pw",
            "db",
            Some("pw"),
            "kv",
        );
        assert_eq!(
            other.to_string(),
            "Unable to load secret/dictionary from vault corresponding to key 'db:pw': boom"
        );
    }

    #[test]
    fn test_incomplete_message() {
        assert_eq!(
            ResolveError::IncompleteVaultConfiguration.to_string(),
            "Placeholders were found but the Vault configuration is not complete."
        );
    }
}
