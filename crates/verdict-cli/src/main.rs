use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use verdict_config::ConfigLoader;

mod commands;
mod reporting;
mod samples;

/// verdict - a minimal test runner.
///
/// Discovers registered test components, runs every test method on a fresh
/// instance with optional setup and teardown, and reports the results.
///
/// EXAMPLES:
///     verdict run                  Run all tests
///     verdict run --quiet          One character per test
///     verdict run --json           Machine-readable output
///     verdict list                 Show the tests a run would execute
///
/// ENVIRONMENT VARIABLES:
///     VERDICT_JSON          Set to '1' for JSON output by default
///     VERDICT_RESULTS_DIR   Directory for report files
///     VERDICT_SAVE_REPORT   Set to '0' to skip writing report files
///     VERDICT_QUIET         Set to '1' for condensed output
///     NO_COLOR              Set to disable colored output
///     RUST_LOG              Log filter for diagnostics on stderr (default: warn)
#[derive(Parser)]
#[command(name = "verdict")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all tests
    ///
    /// Exits with status 1 if any test fails.
    ///
    /// EXAMPLES:
    ///     verdict run                       Run and save a report
    ///     verdict run --no-save             Skip the report file
    ///     verdict run --results-dir=out     Save the report under out/
    #[command(visible_alias = "r")]
    Run {
        /// Print one character per test instead of one line
        #[arg(long, short = 'q')]
        quiet: bool,
        /// Disable colored output
        #[arg(long)]
        no_color: bool,
        /// Output results in JSON format
        #[arg(long, env = "VERDICT_JSON")]
        json: bool,
        /// Directory for the report file
        #[arg(long, value_name = "DIR")]
        results_dir: Option<PathBuf>,
        /// Do not write a report file
        #[arg(long)]
        no_save: bool,
    },

    /// List the tests a run would execute
    #[command(visible_alias = "ls")]
    List,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ConfigLoader::new().load_from_directory(&std::env::current_dir()?)?;
    let module = samples::sample_module();

    match cli.command {
        Commands::Run {
            quiet,
            no_color,
            json,
            results_dir,
            no_save,
        } => {
            // Command-line flags override configuration
            let args = commands::run::RunArgs {
                quiet: quiet || config.quiet(),
                color: !no_color && config.color(),
                json,
                save: !no_save && config.save_report(),
                results_dir: results_dir.unwrap_or_else(|| config.results_dir()),
                report_prefix: config.report_prefix().to_string(),
            };
            if !args.color {
                colored::control::set_override(false);
            }

            let summary = commands::run::run(&module, &args)?;
            if summary.is_success() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::List => {
            commands::list::run(&module)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
