//! Console reporter - display a run summary in the terminal

use super::millis;
use colored::*;
use std::io::{self, Write};
use verdict_core::{TestResult, TestSummary};

/// Console reporter with output configuration
pub struct ConsoleReporter {
    /// One character per test instead of one line
    quiet: bool,
    /// Colorize status markers
    color: bool,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new(quiet: bool) -> Self {
        Self { quiet, color: true }
    }

    /// Enable or disable colored output
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Report a summary on stdout
    pub fn report(&self, summary: &TestSummary) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_report(summary, &mut out)?;
        out.flush()
    }

    /// Report a summary into any writer
    pub fn write_report(&self, summary: &TestSummary, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "=== Test Results ===")?;
        writeln!(out)?;

        if self.quiet {
            for result in summary.results() {
                self.write_marker(result, out)?;
            }
            if !summary.results().is_empty() {
                writeln!(out)?;
            }
            self.write_failures(summary, out)?;
        } else {
            for result in summary.results() {
                self.write_result(result, out)?;
            }
        }

        writeln!(out)?;
        self.write_summary(summary, out)
    }

    /// `[PASS] name (1.23ms)` plus the error line for failures
    fn write_result(&self, result: &TestResult, out: &mut impl Write) -> io::Result<()> {
        let status = if result.passed() {
            self.paint("PASS", Color::Green)
        } else {
            self.paint("FAIL", Color::Red)
        };
        writeln!(
            out,
            "[{}] {} ({:.2}ms)",
            status,
            result.name(),
            millis(result.duration())
        )?;

        if let Some(error) = result.error() {
            writeln!(out, "    {}", self.paint(&format!("Error: {}", error), Color::Red))?;
        }
        Ok(())
    }

    fn write_marker(&self, result: &TestResult, out: &mut impl Write) -> io::Result<()> {
        if result.passed() {
            write!(out, "{}", self.paint(".", Color::Green))
        } else {
            write!(out, "{}", self.paint("F", Color::Red))
        }
    }

    /// Failure details, only needed when individual lines were not printed
    fn write_failures(&self, summary: &TestSummary, out: &mut impl Write) -> io::Result<()> {
        let failures: Vec<_> = summary.failures().collect();
        if failures.is_empty() {
            return Ok(());
        }

        writeln!(out)?;
        writeln!(out, "{}", self.paint("Failures:", Color::Red))?;
        for result in failures {
            writeln!(out, "  {} {}", self.paint("●", Color::Red), result.name())?;
            for line in result.error().unwrap_or_default().lines() {
                writeln!(out, "      {}", line)?;
            }
        }
        Ok(())
    }

    fn write_summary(&self, summary: &TestSummary, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "=== Summary ===")?;
        writeln!(out, "Total Tests: {}", summary.total())?;
        writeln!(
            out,
            "{}",
            self.paint(&format!("Passed: {}", summary.passed()), Color::Green)
        )?;
        writeln!(
            out,
            "{}",
            self.paint(&format!("Failed: {}", summary.failed()), Color::Red)
        )?;
        writeln!(out, "Time: {:.2}ms", millis(summary.total_duration()))
    }

    fn paint(&self, text: &str, color: Color) -> ColoredString {
        if self.color {
            text.color(color)
        } else {
            text.normal()
        }
    }
}
