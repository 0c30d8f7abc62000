//! Run command - execute the sample module and report

use crate::reporting::{json::summary_json, ConsoleReporter, FileReporter};
use anyhow::{Context, Result};
use chrono::Local;
use colored::*;
use std::path::PathBuf;
use verdict_core::{Module, TestRunner, TestSummary};

/// Arguments for the run command, after config and flags are merged
#[derive(Debug, Clone)]
pub struct RunArgs {
    /// One character per test instead of one line
    pub quiet: bool,
    /// Colorize output
    pub color: bool,
    /// Output in JSON format
    pub json: bool,
    /// Write a report file
    pub save: bool,
    /// Directory for the report file
    pub results_dir: PathBuf,
    /// Report file name prefix
    pub report_prefix: String,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            quiet: false,
            color: true,
            json: false,
            save: true,
            results_dir: PathBuf::from("test-results"),
            report_prefix: "test_results".to_string(),
        }
    }
}

/// Run the module and report
///
/// Test failures are part of the returned summary. Only a malformed module
/// or a report that cannot be written is an error.
pub fn run(module: &Module, args: &RunArgs) -> Result<TestSummary> {
    if !args.json {
        println!("{}", "Running tests...".bold());
        println!();
    }

    let summary = TestRunner::new()
        .run(module)
        .context("Error running tests")?;

    if args.json {
        println!("{}", summary_json(&summary));
    } else {
        ConsoleReporter::new(args.quiet)
            .with_color(args.color)
            .report(&summary)?;
    }

    if args.save {
        let reporter = FileReporter::new(&args.results_dir, &args.report_prefix);
        let path = reporter.save(&summary, &Local::now().naive_local())?;
        if args.json {
            eprintln!("Results saved to: {}", path.display());
        } else {
            println!();
            println!("Results saved to: {}", path.display());
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::sample_module;
    use std::fs;
    use tempfile::tempdir;
    use verdict_core::Component;

    #[test]
    fn test_run_samples_without_saving() {
        let args = RunArgs {
            save: false,
            color: false,
            ..Default::default()
        };

        let summary = run(&sample_module(), &args).unwrap();
        assert_eq!(summary.failed(), 1);
    }

    #[test]
    fn test_run_saves_report() {
        let dir = tempdir().unwrap();
        let args = RunArgs {
            color: false,
            results_dir: dir.path().join("reports"),
            ..Default::default()
        };

        run(&sample_module(), &args).unwrap();

        let files: Vec<_> = fs::read_dir(dir.path().join("reports"))
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(files.len(), 1);
        assert!(files[0].starts_with("test_results_"));
    }

    #[test]
    fn test_run_rejects_malformed_module() {
        #[derive(Default)]
        struct Fixture;

        let module = Module::new("broken")
            .component(Component::builder::<Fixture>("Twice").test("a", |_| Ok(())).build())
            .component(Component::builder::<Fixture>("Twice").test("a", |_| Ok(())).build());
        let args = RunArgs {
            save: false,
            ..Default::default()
        };

        let err = run(&module, &args).unwrap_err();
        assert!(format!("{:#}", err).contains("more than once"));
    }
}
