//! Vault KV v2 client.
//!
//! This crate provides the HTTP client used to read secrets from HashiCorp
//! Vault, the three authentication strategies (Kubernetes, AppRole and TLS
//! certificate) with their ordered fallback, and the `SecretStore` seam the
//! resolution engine reads through.

mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod identity;
pub mod models;
pub mod selector;
pub mod store;
pub mod strategy;

pub use auth::{AuthMethod, SessionManager};
pub use client::VaultClient;
pub use client::builder::VaultClientBuilder;
pub use error::{ClientError, Result};
pub use identity::ClientIdentity;
pub use selector::{AuthenticationExhausted, AuthenticationOutcome, select_client, select_with};
pub use store::{SecretStore, StoreFault, render_value};
pub use strategy::{AppRoleStrategy, AuthStrategy, CertificateStrategy, KubernetesStrategy};

/// Testing utilities (available with `test-utils` feature or in tests).
#[cfg(any(feature = "test-utils", test))]
pub mod testing;
