//! Lint findings and their text rendering.

use std::fmt::Write;

/// One checked item and what the linter concluded about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub item: String,
    pub message: String,
}

/// Findings for a single appsettings file.
#[derive(Debug, Clone, Default)]
pub struct FileReport {
    name: String,
    successes: Vec<Finding>,
    warnings: Vec<Finding>,
    failures: Vec<Finding>,
}

impl FileReport {
    pub fn new(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn successes(&self) -> &[Finding] {
        &self.successes
    }

    pub fn warnings(&self) -> &[Finding] {
        &self.warnings
    }

    pub fn failures(&self) -> &[Finding] {
        &self.failures
    }

    pub fn success(&mut self, item: impl Into<String>, message: impl Into<String>) {
        self.successes.push(finding(item, message));
    }

    pub fn warning(&mut self, item: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(finding(item, message));
    }

    pub fn failure(&mut self, item: impl Into<String>, message: impl Into<String>) {
        self.failures.push(finding(item, message));
    }

    fn status(&self) -> &'static str {
        if !self.failures.is_empty() {
            "[FAIL]"
        } else if !self.warnings.is_empty() {
            "[WARN]"
        } else {
            "[PASS]"
        }
    }
}

fn finding(item: impl Into<String>, message: impl Into<String>) -> Finding {
    Finding {
        item: item.into(),
        message: message.into(),
    }
}

/// Findings for every linted file, base file first.
#[derive(Debug, Clone, Default)]
pub struct LintReport {
    files: Vec<FileReport>,
}

impl LintReport {
    pub fn push(&mut self, file: FileReport) {
        self.files.push(file);
    }

    pub fn files(&self) -> &[FileReport] {
        &self.files
    }

    pub fn failure_count(&self) -> usize {
        self.files.iter().map(|f| f.failures.len()).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.files.iter().map(|f| f.warnings.len()).sum()
    }

    /// Render per-file sections followed by a summary.
    pub fn render(&self) -> String {
        let mut out = String::new();

        for file in self.files() {
            let _ = writeln!(out, "\nAppsettings file: {}", file.name());
            render_group(&mut out, "Success", file.successes());
            render_group(&mut out, "Warning", file.warnings());
            render_group(&mut out, "Failure", file.failures());
            let _ = writeln!(
                out,
                "  Successes: {}, Warnings: {}, Failures: {}",
                file.successes().len(),
                file.warnings().len(),
                file.failures().len()
            );
        }

        let _ = writeln!(out, "\n=== Summary ===");
        for file in self.files() {
            let _ = writeln!(out, "  {} {}", file.status(), file.name());
        }
        let _ = writeln!(
            out,
            "  Total warnings: {}, Total failures: {}",
            self.warning_count(),
            self.failure_count()
        );

        out
    }
}

fn render_group(out: &mut String, label: &str, findings: &[Finding]) {
    for finding in findings {
        let _ = writeln!(out, "  {label}: {} {}", finding.item, finding.message);
    }
}
