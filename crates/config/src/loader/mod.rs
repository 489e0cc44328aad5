//! Connection settings loader for the `Vault` section and environment variables.
//!
//! Responsibilities:
//! - Load settings from `.env` files, environment variables, and the `Vault`
//!   section of the configuration tree.
//! - Provide a builder-pattern `SettingsLoader` for layered settings merging.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Does NOT handle:
//! - Parsing configuration files (see `tree`).
//! - Authenticating against Vault (see the client crate).
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over `Vault` section values.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

mod builder;
mod env;
mod error;
mod home;
mod section;

pub use builder::SettingsLoader;
pub use env::{EnvLookup, FnEnv, ProcessEnv, env_var_or_none};
pub use error::SettingsError;

#[cfg(test)]
mod tests;
