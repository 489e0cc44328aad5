//! Hierarchical configuration tree.
//!
//! Responsibilities:
//! - Represent configuration as colon-delimited paths over leaves and sections.
//! - Build trees from JSON and YAML documents.
//! - Merge layered documents, later layers overriding earlier ones key-by-key.
//! - Flatten a tree into `path -> value` pairs.
//!
//! Does NOT handle:
//! - Placeholder detection (see walk.rs and placeholder.rs).
//! - Writing configuration back to disk.
//!
//! Invariants:
//! - A node is either a leaf (no children, optional value) or a section
//!   (children, no value). Constructors enforce this.
//! - Every child's path is its parent's path joined with the child key by `:`.
//! - Key lookup is case-insensitive (ASCII).

use std::collections::BTreeMap;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::walk::walk_leaves;

/// Separator between path segments.
pub const PATH_SEPARATOR: char = ':';

/// Errors raised while loading configuration documents.
#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Failed to read configuration file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid YAML in {origin}: {source}")]
    Yaml {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// YAML allows sequences and mappings as keys; configuration paths do not.
    #[error("Unsupported non-scalar key under '{section}' in {origin}")]
    UnsupportedKey { origin: String, section: String },

    #[error("Unsupported configuration file format: {} (expected .json, .yaml or .yml)", .path.display())]
    UnsupportedFormat { path: PathBuf },
}

/// One node of the configuration tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigNode {
    path: String,
    value: Option<String>,
    children: Vec<ConfigNode>,
}

/// Join a parent path and a child key.
pub fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}{PATH_SEPARATOR}{key}")
    }
}

impl ConfigNode {
    /// Create a leaf. `value` is `None` for `null` and empty containers.
    pub fn leaf(path: impl Into<String>, value: Option<String>) -> Self {
        Self {
            path: path.into(),
            value,
            children: Vec::new(),
        }
    }

    /// Create a section. Child paths are rewritten under `path`.
    pub fn section(path: impl Into<String>, children: Vec<ConfigNode>) -> Self {
        let mut node = Self {
            path: path.into(),
            value: None,
            children,
        };
        let path = node.path.clone();
        node.relocate(path);
        node
    }

    /// Create the root section (empty path).
    pub fn root(children: Vec<ConfigNode>) -> Self {
        Self::section("", children)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last segment of the path.
    pub fn key(&self) -> &str {
        self.path
            .rsplit(PATH_SEPARATOR)
            .next()
            .unwrap_or(self.path.as_str())
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn children(&self) -> &[ConfigNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Find a direct child by key, ignoring ASCII case.
    pub fn child(&self, key: &str) -> Option<&ConfigNode> {
        self.children
            .iter()
            .find(|child| child.key().eq_ignore_ascii_case(key))
    }

    /// Find a descendant by a colon-delimited path relative to this node.
    pub fn get(&self, path: &str) -> Option<&ConfigNode> {
        path.split(PATH_SEPARATOR)
            .try_fold(self, |node, key| node.child(key))
    }

    /// Build a tree from a JSON document.
    pub fn from_json(value: &serde_json::Value) -> Self {
        json_node(String::new(), value)
    }

    /// Build a tree from a YAML document.
    pub fn from_yaml(value: &serde_yaml::Value, origin: &str) -> Result<Self, TreeError> {
        yaml_node(String::new(), value, origin)
    }

    pub fn parse_json(text: &str, origin: &str) -> Result<Self, TreeError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|source| TreeError::Json {
                origin: origin.to_string(),
                source,
            })?;
        Ok(Self::from_json(&value))
    }

    pub fn parse_yaml(text: &str, origin: &str) -> Result<Self, TreeError> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(text).map_err(|source| TreeError::Yaml {
                origin: origin.to_string(),
                source,
            })?;
        Self::from_yaml(&value, origin)
    }

    /// Load a configuration file, choosing the parser by extension.
    pub fn load_file(path: &Path) -> Result<Self, TreeError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str, &str) -> Result<Self, TreeError> = match extension.as_deref() {
            Some("json") => Self::parse_json,
            Some("yaml") | Some("yml") => Self::parse_yaml,
            _ => {
                return Err(TreeError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };

        let text = std::fs::read_to_string(path).map_err(|source| TreeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "Loaded configuration file");
        parse(&text, &path.display().to_string())
    }

    /// Load and merge several files in order; later files win.
    pub fn load_layered<P: AsRef<Path>>(paths: &[P]) -> Result<Self, TreeError> {
        paths.iter().try_fold(Self::root(Vec::new()), |merged, path| {
            Ok(merged.merge(Self::load_file(path.as_ref())?))
        })
    }

    /// Overlay `other` on top of `self`.
    ///
    /// Sections merge key-by-key (keys compared case-insensitively, the first
    /// spelling is kept). A leaf replaces whatever it lands on, except that a
    /// value-less leaf (`null`, `{}`, `[]`) never erases existing content.
    pub fn merge(mut self, other: ConfigNode) -> ConfigNode {
        if other.is_leaf() && other.value.is_none() {
            return self;
        }

        if self.is_leaf() || other.is_leaf() {
            let mut replaced = other;
            replaced.relocate(self.path);
            return replaced;
        }

        for incoming in other.children {
            match self
                .children
                .iter()
                .position(|existing| existing.key().eq_ignore_ascii_case(incoming.key()))
            {
                Some(index) => {
                    let existing = self.children.remove(index);
                    self.children.insert(index, existing.merge(incoming));
                }
                None => {
                    let mut added = incoming;
                    let path = join_path(&self.path, added.key());
                    added.relocate(path);
                    self.children.push(added);
                }
            }
        }
        self
    }

    /// Every valued leaf as `path -> value`.
    pub fn flatten(&self) -> BTreeMap<String, String> {
        let mut flat = BTreeMap::new();
        let _ = walk_leaves(self, &mut |leaf: &ConfigNode| {
            if let Some(value) = leaf.value() {
                flat.insert(leaf.path().to_string(), value.to_string());
            }
            ControlFlow::<()>::Continue(())
        });
        flat
    }

    // Children must already live under `path`.
    fn with_children(path: String, children: Vec<ConfigNode>) -> Self {
        Self {
            path,
            value: None,
            children,
        }
    }

    fn relocate(&mut self, path: String) {
        for child in &mut self.children {
            let child_path = join_path(&path, child.key());
            child.relocate(child_path);
        }
        self.path = path;
    }
}

fn json_node(path: String, value: &serde_json::Value) -> ConfigNode {
    use serde_json::Value;

    match value {
        Value::Object(map) => {
            let children = map
                .iter()
                .map(|(key, child)| json_node(join_path(&path, key), child))
                .collect();
            ConfigNode::with_children(path, children)
        }
        Value::Array(items) => {
            let children = items
                .iter()
                .enumerate()
                .map(|(index, child)| json_node(join_path(&path, &index.to_string()), child))
                .collect();
            ConfigNode::with_children(path, children)
        }
        Value::Null => ConfigNode::leaf(path, None),
        Value::String(text) => ConfigNode::leaf(path, Some(text.clone())),
        Value::Bool(flag) => ConfigNode::leaf(path, Some(flag.to_string())),
        Value::Number(number) => ConfigNode::leaf(path, Some(number.to_string())),
    }
}

fn yaml_node(path: String, value: &serde_yaml::Value, origin: &str) -> Result<ConfigNode, TreeError> {
    use serde_yaml::Value;

    match value {
        Value::Mapping(map) => {
            let children = map
                .iter()
                .map(|(key, child)| {
                    let key = yaml_scalar(key).ok_or_else(|| TreeError::UnsupportedKey {
                        origin: origin.to_string(),
                        section: path.clone(),
                    })?;
                    yaml_node(join_path(&path, &key), child, origin)
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ConfigNode::with_children(path, children))
        }
        Value::Sequence(items) => {
            let children = items
                .iter()
                .enumerate()
                .map(|(index, child)| yaml_node(join_path(&path, &index.to_string()), child, origin))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ConfigNode::with_children(path, children))
        }
        Value::Tagged(tagged) => yaml_node(path, &tagged.value, origin),
        scalar => Ok(ConfigNode::leaf(path, yaml_scalar(scalar))),
    }
}

fn yaml_scalar(value: &serde_yaml::Value) -> Option<String> {
    use serde_yaml::Value;

    match value {
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Tagged(tagged) => yaml_scalar(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
