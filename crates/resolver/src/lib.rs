//! Materializes Vault placeholders in a configuration tree.
//!
//! The pipeline checks for placeholders, loads and validates the Vault
//! connection settings, selects an authentication strategy and finally walks
//! the tree, writing every resolved value into a [`ResolutionOverlay`].

mod engine;
mod error;
mod overlay;
mod pipeline;

pub use engine::resolve;
pub use error::ResolveError;
pub use overlay::ResolutionOverlay;
pub use pipeline::{load_settings, resolve_configuration, resolve_with_settings};
