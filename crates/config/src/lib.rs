//! Configuration model for Vault-backed secret placeholders.
//!
//! This crate provides the placeholder grammar, the hierarchical
//! configuration tree and its walker, and the loader for Vault connection
//! settings drawn from the `Vault` section and environment variables.

pub mod constants;
mod loader;
pub mod placeholder;
pub mod settings;
pub mod tree;
pub mod walk;

pub use loader::{EnvLookup, FnEnv, ProcessEnv, SettingsError, SettingsLoader, env_var_or_none};
pub use placeholder::{Placeholder, PlaceholderError, PlaceholderKind};
pub use settings::{AppRoleSettings, CertificateSettings, ConnectionSettings, KubernetesSettings};
pub use tree::{ConfigNode, TreeError};
pub use walk::{has_placeholders, walk_leaves};
