//! Appsettings linter.
//!
//! Responsibilities:
//! - Find `appsettings.json` and every `appsettings.*.json` in a directory.
//! - Check placeholder syntax and the `Vault` section of each file.
//! - Collect successes, warnings and failures per file.
//!
//! Does NOT handle:
//! - Resolving placeholders or contacting Vault.
//! - Printing (the report renders to a string).
//!
//! Invariants:
//! - A missing directory or base file is an error, not a report entry.
//! - Invalid JSON is one failure for that file; linting continues with the next.
//! - Environment files are linted in file name order.

mod report;
mod rules;

use std::path::{Path, PathBuf};
use thiserror::Error;
use vault_config::ConfigNode;

pub use report::{FileReport, LintReport};

/// Name of the base settings file.
pub const BASE_FILE: &str = "appsettings.json";

#[derive(Error, Debug)]
pub enum LintError {
    #[error("The provided directory '{}' does not exist!", path.display())]
    MissingDirectory { path: PathBuf },

    #[error("The base file 'appsettings.json' wasn't found in the provided directory.")]
    MissingBaseFile { path: PathBuf },

    #[error("Failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Linting found {count} failure(s)")]
    Failures { count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileRole {
    Base,
    Environment,
}

/// Lint the appsettings files in `dir`.
pub fn lint_dir(dir: &Path) -> Result<LintReport, LintError> {
    if !dir.is_dir() {
        return Err(LintError::MissingDirectory {
            path: dir.to_path_buf(),
        });
    }

    let base = dir.join(BASE_FILE);
    if !base.is_file() {
        return Err(LintError::MissingBaseFile { path: base });
    }

    let mut report = LintReport::default();
    report.push(lint_file(&base, FileRole::Base)?);

    let entries = std::fs::read_dir(dir).map_err(|source| LintError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut environment_files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_environment_file(path))
        .collect();
    environment_files.sort();

    for path in environment_files {
        report.push(lint_file(&path, FileRole::Environment)?);
    }

    Ok(report)
}

fn is_environment_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name != BASE_FILE && name.starts_with("appsettings.") && name.ends_with(".json")
}

fn lint_file(path: &Path, role: FileRole) -> Result<FileReport, LintError> {
    let name = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|source| LintError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut file = FileReport::new(name.clone());
    let Ok(tree) = ConfigNode::parse_json(&text, &name) else {
        file.failure(
            "Invalid JSON",
            "File has a broken JSON syntax and could not be parsed.",
        );
        return Ok(file);
    };

    match role {
        FileRole::Base => rules::check_base_placeholders(&tree, &mut file),
        FileRole::Environment => rules::check_environment_placeholders(&tree, &mut file),
    }
    rules::check_vault_section(&tree, &mut file);

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        std::fs::write(dir.path().join(name), content).unwrap();
    }

    #[test]
    fn test_missing_directory() {
        let err = lint_dir(Path::new("/nonexistent/config")).unwrap_err();
        assert!(matches!(err, LintError::MissingDirectory { .. }));
    }

    #[test]
    fn test_missing_base_file() {
        let dir = TempDir::new().unwrap();
        write(&dir, "appsettings.Production.json", "{}");
        let err = lint_dir(dir.path()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The base file 'appsettings.json' wasn't found in the provided directory."
        );
    }

    #[test]
    fn test_environment_files_are_found_in_order() {
        let dir = TempDir::new().unwrap();
        write(&dir, "appsettings.json", r#"{"Vault": {}}"#);
        write(&dir, "appsettings.Staging.json", r#"{"Vault": {}}"#);
        write(&dir, "appsettings.Development.json", r#"{"Vault": {}}"#);
        write(&dir, "other.json", "not json");

        let report = lint_dir(dir.path()).unwrap();
        let names: Vec<_> = report
            .files()
            .iter()
            .map(|f| {
                Path::new(f.name())
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        assert_eq!(
            names,
            [
                "appsettings.json",
                "appsettings.Development.json",
                "appsettings.Staging.json"
            ]
        );
    }

    #[test]
    fn test_invalid_json_is_one_failure() {
        let dir = TempDir::new().unwrap();
        write(&dir, "appsettings.json", r#"{"Vault": {}}"#);
        write(&dir, "appsettings.Broken.json", "{ not json");

        let report = lint_dir(dir.path()).unwrap();
        let broken = &report.files()[1];
        assert_eq!(broken.failures().len(), 1);
        assert_eq!(broken.failures()[0].item, "Invalid JSON");
        assert_eq!(report.failure_count(), 1);
    }
}
