//! Resolve command implementation.

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;
use vault_config::ProcessEnv;
use vault_resolver::resolve_configuration;

use crate::commands::load_tree;
use crate::formatters::{OutputFormat, get_formatter};

pub async fn run(files: &[PathBuf], output_format: OutputFormat, merged: bool) -> Result<()> {
    let tree = load_tree(files)?;
    let overlay = resolve_configuration(&tree, &ProcessEnv).await?;
    info!(entries = overlay.len(), "Configuration resolved");

    let entries = if merged {
        let mut flat = tree.flatten();
        overlay.apply_to(&mut flat);
        flat
    } else {
        overlay.into_inner()
    };

    let output = get_formatter(output_format).format_entries(&entries)?;
    print!("{}", output);
    Ok(())
}
