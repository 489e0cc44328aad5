//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to appropriate command handlers.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Exit code mapping (see `error` module).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;

/// Dispatch CLI commands to their respective handlers.
pub(crate) async fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Resolve {
            files,
            output,
            merged,
        } => commands::resolve::run(&files, output, merged).await,
        Commands::Check { files } => commands::check::run(&files),
        Commands::Lint { work_dir } => commands::lint::run(&work_dir),
    }
}
