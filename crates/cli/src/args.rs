//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::formatters::OutputFormat;

#[derive(Parser)]
#[command(name = "vaultcfg")]
#[command(about = "Resolve Vault secret placeholders in layered configuration files", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  vaultcfg check appsettings.json appsettings.Production.json\n  vaultcfg resolve appsettings.json --output env\n  vaultcfg resolve appsettings.json appsettings.Production.json --merged\n  vaultcfg lint --work-dir ./config\n"
)]
pub struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log output format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve every placeholder and print the resulting values
    Resolve {
        /// JSON or YAML files, later files override earlier ones
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        output: OutputFormat,

        /// Print the whole flattened configuration with resolved values applied
        #[arg(long)]
        merged: bool,
    },

    /// Report placeholders and whether Vault access is configured (no network)
    Check {
        /// JSON or YAML files, later files override earlier ones
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },

    /// Lint appsettings.json and appsettings.*.json files in a directory
    Lint {
        /// Directory holding the appsettings files
        #[arg(long, value_name = "DIR")]
        work_dir: PathBuf,
    },
}
