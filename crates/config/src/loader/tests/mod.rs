//! Tests for the settings loader builder.
//!
//! Responsibilities:
//! - Test precedence between the `Vault` section and environment variables.
//! - Test validation performed by `build()`.
//! - Test `.env` loading and the `DOTENV_DISABLED` gate.
//!
//! Invariants:
//! - Tests that touch process-global state (cwd, env) are `#[serial]`.
//! - Everything else goes through an injected `HashMap` environment.

use serde_json::json;
use std::collections::HashMap;

use crate::tree::ConfigNode;


/// A tree holding a `Vault` section with the given keys.
pub fn vault_tree(section: serde_json::Value) -> ConfigNode {
    ConfigNode::from_json(&json!({ "Vault": section }))
}

/// An injected environment built from string pairs.
pub fn env_of(pairs: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
    pairs.iter().copied().collect()
}
