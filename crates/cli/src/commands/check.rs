//! Check command implementation.
//!
//! Reports the placeholders in the merged configuration and whether Vault
//! access is configured well enough to resolve them. Never contacts Vault.

use anyhow::Result;
use std::path::PathBuf;
use vault_config::walk::placeholder_tokens;
use vault_config::{ConnectionSettings, ProcessEnv};
use vault_resolver::{ResolveError, load_settings};

use crate::commands::load_tree;

pub fn run(files: &[PathBuf]) -> Result<()> {
    let tree = load_tree(files)?;
    let tokens = placeholder_tokens(&tree);

    if tokens.is_empty() {
        println!("No Vault placeholders found.");
        return Ok(());
    }

    println!("Found {} placeholder(s):", tokens.len());
    for (path, raw) in &tokens {
        println!("  {}: {}", path, raw);
    }

    let settings = load_settings(&tree, &ProcessEnv)?;
    if !settings.is_complete() {
        return Err(ResolveError::IncompleteVaultConfiguration.into());
    }

    print_settings(&settings);
    Ok(())
}

fn print_settings(settings: &ConnectionSettings) {
    println!(
        "Vault: {} (mount point '{}')",
        settings.address.as_deref().unwrap_or_default(),
        settings.mount_point()
    );
    let strategies = [
        ("Kubernetes", settings.kubernetes.is_complete()),
        ("AppRole", settings.approle.is_complete()),
        ("Certificate", settings.certificate.is_complete()),
    ];
    for (name, configured) in strategies {
        let state = if configured { "configured" } else { "not configured" };
        println!("  {}: {}", name, state);
    }
}
