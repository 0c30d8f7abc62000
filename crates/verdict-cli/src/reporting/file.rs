//! File reporter - persist a run summary under the results directory

use super::millis;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::fs;
use std::path::PathBuf;
use verdict_core::{TestResult, TestSummary};

/// Writes one timestamped text report per run
pub struct FileReporter {
    dir: PathBuf,
    prefix: String,
}

impl FileReporter {
    /// Reporter writing `<prefix>_<timestamp>.txt` files into `dir`
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    /// `<prefix>_<ddMMyyyy_HHmmss>.txt`
    pub fn file_name(&self, generated: &NaiveDateTime) -> String {
        format!("{}_{}.txt", self.prefix, generated.format("%d%m%Y_%H%M%S"))
    }

    /// Render the report text
    pub fn render(summary: &TestSummary, generated: &NaiveDateTime) -> String {
        let mut text = format!(
            "Test Results Report\nGenerated: {}\n\n",
            generated.format("%d-%m-%Y %H:%M:%S")
        );

        for result in summary.results() {
            text.push_str(&render_result(result));
        }

        text.push_str(&format!(
            "Summary:\nTotal: {}\nPassed: {}\nFailed: {}\n",
            summary.total(),
            summary.passed(),
            summary.failed()
        ));
        text
    }

    /// Write the report, creating the results directory if needed
    ///
    /// Returns the absolute path of the written file.
    pub fn save(&self, summary: &TestSummary, generated: &NaiveDateTime) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create results directory {}", self.dir.display())
        })?;

        let path = self.dir.join(self.file_name(generated));
        fs::write(&path, Self::render(summary, generated))
            .with_context(|| format!("Failed to write report {}", path.display()))?;

        fs::canonicalize(&path)
            .with_context(|| format!("Failed to resolve report path {}", path.display()))
    }
}

/// One result block: status line, optional error, duration, blank line
fn render_result(result: &TestResult) -> String {
    let status = if result.passed() { "PASS" } else { "FAIL" };
    let error = result
        .error()
        .map(|error| format!("    Error: {}\n", error))
        .unwrap_or_default();

    format!(
        "{} - {}\n{}    Duration: {:.2}ms\n\n",
        status,
        result.name(),
        error,
        millis(result.duration())
    )
}
