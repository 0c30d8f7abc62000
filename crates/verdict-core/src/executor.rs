//! Test execution - drive each test method through its lifecycle

use crate::discovery::TestPlan;
use crate::error::LifecycleError;
use crate::module::{Component, Instance, Method};
use crate::result::TestResult;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Runs the test methods of one component, one fresh instance per test
#[derive(Debug, Default, Clone, Copy)]
pub struct Executor;

impl Executor {
    /// Create a new executor
    pub fn new() -> Self {
        Self
    }

    /// Run every test method of a component in declaration order
    pub fn run_component(&self, component: &Component) -> Vec<TestResult> {
        self.run_plan(&TestPlan::for_component(component))
    }

    /// Run an already partitioned component
    pub fn run_plan(&self, plan: &TestPlan<'_>) -> Vec<TestResult> {
        plan.tests
            .iter()
            .map(|test| self.run_single_test(plan, test))
            .collect()
    }

    /// Run a single test: construct, setup, test, teardown
    ///
    /// Teardown runs whenever an instance exists, even after a failed setup
    /// or test body. Its failures are logged and never change the result.
    /// The reported duration runs from just after construction until
    /// teardown returns; a test whose instance cannot be built reports zero.
    fn run_single_test(&self, plan: &TestPlan<'_>, test: &Method) -> TestResult {
        let name = plan.qualified_name(test);

        let (outcome, duration) = match plan.component.instantiate() {
            Ok(mut instance) => {
                let start = Instant::now();
                let outcome = run_body(plan, test, &name, &mut instance);

                if let Some(teardown) = plan.teardown {
                    if let Err(cause) = teardown.invoke(&mut instance) {
                        let err = LifecycleError::Teardown {
                            test: name.clone(),
                            cause,
                        };
                        warn!(test = %name, stage = err.stage(), "{}", err);
                    }
                }

                (outcome, start.elapsed())
            }
            Err(cause) => (
                Err(LifecycleError::Instantiation {
                    component: plan.component.name().to_string(),
                    cause,
                }),
                Duration::ZERO,
            ),
        };

        match outcome {
            Ok(()) => {
                debug!(test = %name, ?duration, "passed");
                TestResult::pass(name, duration)
            }
            Err(err) => {
                debug!(test = %name, ?duration, stage = err.stage(), "failed: {}", err.cause());
                TestResult::fail(name, err.cause(), duration)
            }
        }
    }
}

/// Setup then test body; the body is skipped when setup fails
fn run_body(
    plan: &TestPlan<'_>,
    test: &Method,
    name: &str,
    instance: &mut Instance,
) -> Result<(), LifecycleError> {
    if let Some(setup) = plan.setup {
        setup.invoke(instance).map_err(|cause| LifecycleError::Setup {
            test: name.to_string(),
            cause,
        })?;
    }

    test.invoke(instance).map_err(|cause| LifecycleError::Test {
        test: name.to_string(),
        cause,
    })
}
