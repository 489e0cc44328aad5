//! Flat configuration layer holding resolved values.

use std::collections::BTreeMap;
use std::fmt;

/// Resolved values keyed by colon-delimited configuration path.
///
/// Values are secrets, so `Debug` lists keys only.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ResolutionOverlay {
    entries: BTreeMap<String, String>,
}

impl ResolutionOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Set `path` to `value`, replacing any earlier entry.
    pub fn insert(&mut self, path: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(path.into(), value.into());
    }

    /// Replace `token` with `secret` in the value at `path`.
    ///
    /// The first splice for a path starts from `original`; later ones work on
    /// the result of the previous splice.
    pub(crate) fn splice(&mut self, path: &str, original: &str, token: &str, secret: &str) {
        let current = self
            .entries
            .entry(path.to_string())
            .or_insert_with(|| original.to_string());
        *current = current.replace(token, secret);
    }

    /// Layer this overlay on top of a flattened configuration.
    pub fn apply_to(&self, base: &mut BTreeMap<String, String>) {
        base.extend(self.entries.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.entries
    }
}

impl fmt::Debug for ResolutionOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionOverlay")
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
