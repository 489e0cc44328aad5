//! CLI command implementations.

pub mod check;
pub mod lint;
pub mod resolve;

use anyhow::{Context, Result};
use std::path::PathBuf;
use vault_config::ConfigNode;

/// Load and merge the configuration files in order.
pub(crate) fn load_tree(files: &[PathBuf]) -> Result<ConfigNode> {
    ConfigNode::load_layered(files).context("Failed to load configuration files")
}
