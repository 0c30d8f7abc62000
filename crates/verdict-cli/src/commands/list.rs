//! List command - show what a run would execute

use anyhow::{Context, Result};
use verdict_core::{Module, TestSuite};

/// Print every discovered test, one qualified name per line
pub fn run(module: &Module) -> Result<usize> {
    let suite = TestSuite::discover(module).context("Error discovering tests")?;

    for name in suite.test_names() {
        println!("{}", name);
    }
    println!();
    println!(
        "{} test{} in {} component{}",
        suite.len(),
        if suite.len() == 1 { "" } else { "s" },
        suite.plans.len(),
        if suite.plans.len() == 1 { "" } else { "s" }
    );

    Ok(suite.len())
}
