//! Secret resolution engine.
//!
//! Responsibilities:
//! - Visit every leaf holding a placeholder and classify each token.
//! - Read `vault_secret` fields and `vault_dict` paths through a `SecretStore`.
//! - Write the results into a `ResolutionOverlay`.
//!
//! Does NOT handle:
//! - Loading settings or choosing the authentication strategy (see `pipeline`).
//! - `user_home` tokens outside the `Vault` section; they are left as written.
//!
//! Invariants:
//! - Fail-fast: the first error aborts the pass.
//! - Store calls are awaited one at a time, in walk order.
//! - Tokens in one leaf are spliced left to right with plain text replacement,
//!   so a secret that contains a later token's text is replaced too.
//! - A `vault_dict` expansion never writes the leaf's own path.

use tracing::debug;
use vault_client::SecretStore;
use vault_config::placeholder::scan;
use vault_config::tree::join_path;
use vault_config::walk::placeholder_leaves;
use vault_config::{ConfigNode, Placeholder, PlaceholderKind};

use crate::error::ResolveError;
use crate::overlay::ResolutionOverlay;

/// Resolve every placeholder in `tree` against `store` at `mount`.
///
/// # Errors
///
/// Returns the first [`ResolveError`] met while walking the tree.
pub async fn resolve<S: SecretStore>(
    tree: &ConfigNode,
    store: &mut S,
    mount: &str,
) -> Result<ResolutionOverlay, ResolveError> {
    let mut overlay = ResolutionOverlay::new();

    for leaf in placeholder_leaves(tree) {
        resolve_leaf(leaf, store, mount, &mut overlay).await?;
    }

    tracing::info!(entries = overlay.len(), "Vault placeholders resolved");
    Ok(overlay)
}

async fn resolve_leaf<S: SecretStore>(
    leaf: &ConfigNode,
    store: &mut S,
    mount: &str,
    overlay: &mut ResolutionOverlay,
) -> Result<(), ResolveError> {
    let Some(value) = leaf.value() else {
        return Ok(());
    };
    let section = leaf.path();

    for raw in scan(value) {
        let placeholder =
            Placeholder::parse(raw).map_err(|_| ResolveError::MalformedPlaceholder {
                section: section.to_string(),
                placeholder: raw.to_string(),
            })?;
        let key = placeholder.key().unwrap_or_default();

        match placeholder.kind() {
            PlaceholderKind::UserHome => {
                debug!(section, "Leaving user_home placeholder in place");
            }
            PlaceholderKind::SecretField => {
                let (path, field) = placeholder.secret_field_key().map_err(|_| {
                    ResolveError::MalformedSecretKey {
                        section: section.to_string(),
                        key: key.to_string(),
                    }
                })?;
                debug!(section, path, field, "Reading secret field");

                let secret = store
                    .read_field(path, field, mount)
                    .await
                    .map_err(|fault| ResolveError::from_fault(fault, key, path, Some(field), mount))?
                    .ok_or_else(|| ResolveError::MissingSecret {
                        path: path.to_string(),
                        field: Some(field.to_string()),
                    })?;

                overlay.splice(section, value, raw, &secret);
            }
            PlaceholderKind::SecretDict => {
                debug!(section, path = key, "Reading secret dictionary");

                let entries = store
                    .read_all(key, mount)
                    .await
                    .map_err(|fault| ResolveError::from_fault(fault, key, key, None, mount))?;

                for (field, secret) in entries {
                    overlay.insert(join_path(section, &field), secret);
                }
            }
            PlaceholderKind::Unrecognized(kind) => {
                return Err(ResolveError::UnknownPlaceholderKind {
                    kind: kind.clone(),
                    placeholder: raw.to_string(),
                });
            }
        }
    }

    Ok(())
}
