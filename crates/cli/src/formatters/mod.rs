//! Output formatters for resolved configuration.
//!
//! Responsibilities:
//! - Render a flat `path -> value` map as JSON, YAML or `KEY=value` lines.
//!
//! Does NOT handle:
//! - Direct printing to stdout (returns formatted strings).
//!
//! Invariants:
//! - Entries are rendered in key order.
//! - Empty maps produce valid output (`{}` for JSON, nothing for env).

use anyhow::Result;
use clap::ValueEnum;
use std::collections::BTreeMap;

mod env;
mod json;
mod yaml;

pub use env::EnvFormatter;
pub use json::JsonFormatter;
pub use yaml::YamlFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Env,
}

/// Renders flattened configuration entries.
pub trait Formatter {
    fn format_entries(&self, entries: &BTreeMap<String, String>) -> Result<String>;
}

/// Get a formatter for the given output format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Yaml => Box::new(YamlFormatter),
        OutputFormat::Env => Box::new(EnvFormatter),
    }
}
