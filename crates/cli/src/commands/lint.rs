//! Lint command implementation.

use anyhow::Result;
use std::path::Path;

use crate::linter::{LintError, lint_dir};

pub fn run(work_dir: &Path) -> Result<()> {
    println!("=== Appsettings Linter ===");
    println!(
        "\nValidating the appsettings files found in: {}",
        work_dir.display()
    );

    let report = lint_dir(work_dir)?;
    print!("{}", report.render());

    match report.failure_count() {
        0 => Ok(()),
        count => Err(LintError::Failures { count }.into()),
    }
}
