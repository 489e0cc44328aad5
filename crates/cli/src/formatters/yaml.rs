//! YAML formatter implementation.

use anyhow::Result;
use std::collections::BTreeMap;

use crate::formatters::Formatter;

/// YAML formatter.
pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn format_entries(&self, entries: &BTreeMap<String, String>) -> Result<String> {
        Ok(serde_yaml::to_string(entries)?)
    }
}
