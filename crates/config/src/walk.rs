//! Leaf traversal over a configuration tree.
//!
//! The presence check and the resolution engine share [`walk_leaves`]; the
//! visitor decides whether to stop early.

use std::ops::ControlFlow;

use crate::placeholder::{contains_placeholder, scan};
use crate::tree::ConfigNode;

/// Visit every leaf depth-first in child order.
///
/// Returns `ControlFlow::Break` as soon as the visitor does.
pub fn walk_leaves<'a, B, F>(node: &'a ConfigNode, visit: &mut F) -> ControlFlow<B>
where
    F: FnMut(&'a ConfigNode) -> ControlFlow<B>,
{
    if node.is_leaf() {
        return visit(node);
    }
    for child in node.children() {
        walk_leaves(child, visit)?;
    }
    ControlFlow::Continue(())
}

/// Whether any leaf value contains a placeholder token.
pub fn has_placeholders(node: &ConfigNode) -> bool {
    walk_leaves(node, &mut |leaf: &ConfigNode| {
        match leaf.value() {
            Some(value) if contains_placeholder(value) => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    })
    .is_break()
}

/// Leaves carrying at least one placeholder, in walk order.
pub fn placeholder_leaves<'a>(node: &'a ConfigNode) -> Vec<&'a ConfigNode> {
    let mut found = Vec::new();
    let _ = walk_leaves(node, &mut |leaf: &'a ConfigNode| {
        if leaf.value().is_some_and(contains_placeholder) {
            found.push(leaf);
        }
        ControlFlow::<()>::Continue(())
    });
    found
}

/// Every `(leaf path, raw token)` pair in walk order.
pub fn placeholder_tokens(node: &ConfigNode) -> Vec<(&str, &str)> {
    placeholder_leaves(node)
        .into_iter()
        .flat_map(|leaf| {
            let value = leaf.value().unwrap_or_default();
            scan(value).into_iter().map(move |raw| (leaf.path(), raw))
        })
        .collect()
}
