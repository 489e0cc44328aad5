//! End-to-end resolution of a configuration tree.
//!
//! Responsibilities:
//! - Short-circuit when the tree holds no placeholders.
//! - Build `ConnectionSettings` from the `Vault` section and the environment.
//! - Select an authenticated client and run the engine.
//!
//! Does NOT handle:
//! - Loading `.env` files; the host decides whether to call
//!   `SettingsLoader::load_dotenv` first.
//!
//! Invariants:
//! - A tree without placeholders never touches settings or the network.
//! - Settings errors surface before completeness is checked, and both before
//!   any strategy is attempted.

use tracing::{debug, info};
use vault_client::select_client;
use vault_config::{ConfigNode, ConnectionSettings, EnvLookup, SettingsLoader, has_placeholders};

use crate::engine::resolve;
use crate::error::ResolveError;
use crate::overlay::ResolutionOverlay;

/// Build and validate connection settings for `tree`.
///
/// File values come from the tree's `Vault` section; non-empty environment
/// values override them.
pub fn load_settings(
    tree: &ConfigNode,
    env: &impl EnvLookup,
) -> Result<ConnectionSettings, ResolveError> {
    let settings = SettingsLoader::new()
        .from_tree(tree)?
        .from_env(env)?
        .build()?;
    Ok(settings)
}

/// Resolve every placeholder in `tree`.
///
/// # Errors
///
/// Returns [`ResolveError::IncompleteVaultConfiguration`] when placeholders
/// exist but no address or strategy inputs are configured, and any settings,
/// authentication or lookup error otherwise.
pub async fn resolve_configuration(
    tree: &ConfigNode,
    env: &impl EnvLookup,
) -> Result<ResolutionOverlay, ResolveError> {
    if !has_placeholders(tree) {
        debug!("No Vault placeholders found, skipping resolution");
        return Ok(ResolutionOverlay::new());
    }

    let settings = load_settings(tree, env)?;
    resolve_with_settings(tree, &settings).await
}

/// Resolve `tree` with already-built settings.
pub async fn resolve_with_settings(
    tree: &ConfigNode,
    settings: &ConnectionSettings,
) -> Result<ResolutionOverlay, ResolveError> {
    if !has_placeholders(tree) {
        return Ok(ResolutionOverlay::new());
    }
    if !settings.is_complete() {
        return Err(ResolveError::IncompleteVaultConfiguration);
    }

    let mut client = select_client(settings)?;
    info!(
        address = client.address(),
        mount_point = settings.mount_point(),
        method = client.auth_method_name(),
        "Resolving Vault placeholders"
    );
    resolve(tree, &mut client, settings.mount_point()).await
}
