//! JSON formatter implementation.

use anyhow::Result;
use std::collections::BTreeMap;

use crate::formatters::Formatter;

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_entries(&self, entries: &BTreeMap<String, String>) -> Result<String> {
        let mut output = serde_json::to_string_pretty(entries)?;
        output.push('\n');
        Ok(output)
    }
}
