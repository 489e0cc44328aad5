//! Environment variable formatter.
//!
//! Keys use the `__` section separator understood by hierarchical
//! configuration binders; values are single-quoted for POSIX shells.

use anyhow::Result;
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::formatters::Formatter;

/// `KEY='value'` formatter.
pub struct EnvFormatter;

fn env_key(path: &str) -> String {
    path.replace(':', "__")
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

impl Formatter for EnvFormatter {
    fn format_entries(&self, entries: &BTreeMap<String, String>) -> Result<String> {
        let mut output = String::new();
        for (path, value) in entries {
            writeln!(output, "{}={}", env_key(path), shell_quote(value))?;
        }
        Ok(output)
    }
}
