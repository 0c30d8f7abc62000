//! Test runner - discover, execute and aggregate a whole module

use crate::discovery::discover_components;
use crate::error::DiscoveryResult;
use crate::executor::Executor;
use crate::module::Module;
use crate::result::TestSummary;
use std::time::Instant;
use tracing::{info, info_span};

/// Top-level orchestration of one run
///
/// Components run strictly one after another, in declaration order.
/// Per-test failures end up in the summary; only a malformed module
/// makes [`TestRunner::run`] return an error.
#[derive(Debug, Default)]
pub struct TestRunner {
    executor: Executor,
}

impl TestRunner {
    /// Create a new test runner
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every test of the module and summarize the outcome
    pub fn run(&self, module: &Module) -> DiscoveryResult<TestSummary> {
        let started = Instant::now();
        let components = discover_components(module)?;
        info!(
            module = module.name(),
            components = components.len(),
            "running tests"
        );

        let mut summary = TestSummary::new();
        for component in components {
            let _span = info_span!("component", name = component.name()).entered();
            summary.extend(self.executor.run_component(component));
        }

        info!(
            module = module.name(),
            total = summary.total(),
            passed = summary.passed(),
            failed = summary.failed(),
            elapsed = ?started.elapsed(),
            "run finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiscoveryError;
    use crate::module::Component;
    use crate::result::TestResult;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Fixture {
        ready: bool,
    }

    #[test]
    fn test_runner_aggregates_components_in_order() {
        let module = Module::new("fixtures")
            .component(
                Component::builder::<Fixture>("First")
                    .test("a", |_| Ok(()))
                    .test("b", |_| anyhow::bail!("b broke"))
                    .build(),
            )
            .component(
                Component::builder::<Fixture>("NoTests")
                    .method("helper", |_| Ok(()))
                    .build(),
            )
            .component(
                Component::builder::<Fixture>("Second")
                    .setup("setup", |f| {
                        f.ready = true;
                        Ok(())
                    })
                    .test("c", |f| {
                        anyhow::ensure!(f.ready, "setup did not run");
                        Ok(())
                    })
                    .build(),
            );

        let summary = TestRunner::new().run(&module).unwrap();

        assert_eq!(summary.total(), 3);
        assert_eq!(summary.passed(), 2);
        assert_eq!(summary.failed(), 1);
        let names: Vec<_> = summary.results().iter().map(TestResult::name).collect();
        assert_eq!(names, vec!["First.a", "First.b", "Second.c"]);
    }

    #[test]
    fn test_runner_empty_module() {
        let summary = TestRunner::new().run(&Module::new("empty")).unwrap();
        assert_eq!(summary, TestSummary::new());
    }

    #[test]
    fn test_runner_propagates_discovery_error() {
        let module = Module::new("fixtures").component(
            Component::builder::<Fixture>("Dup")
                .test("x", |_| Ok(()))
                .test("x", |_| Ok(()))
                .build(),
        );

        assert_eq!(
            TestRunner::new().run(&module),
            Err(DiscoveryError::duplicate_method("Dup", "x"))
        );
    }
}
