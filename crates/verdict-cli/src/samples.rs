//! Built-in sample tests run by `verdict run`

use tracing::debug;
use verdict_core::{Component, Module};

/// Sample fixture state; a fresh value is built for every test
#[derive(Debug, Default)]
pub struct SampleTests {
    test_value: i32,
}

fn sample_tests() -> Component {
    Component::builder::<SampleTests>("SampleTests")
        .setup("setup", |t| {
            t.test_value = 42;
            debug!("setup called");
            Ok(())
        })
        .teardown("teardown", |_| {
            debug!("teardown called");
            Ok(())
        })
        .test("test_that_passes", |t| {
            anyhow::ensure!(t.test_value == 42, "Test value should be 42");
            Ok(())
        })
        .test("test_that_fails", |_| {
            anyhow::bail!("This test always fails")
        })
        .test("test_basic_math", |_| {
            let result = 2 + 2;
            anyhow::ensure!(result == 4, "Expected 4, got {}", result);
            Ok(())
        })
        .test("test_string_operations", |_| {
            let text = "Hello World";
            anyhow::ensure!(text.contains("World"), "String should contain 'World'");
            Ok(())
        })
        // Carries no marker, so it is never run
        .method("not_a_test", |_| anyhow::bail!("This should not run"))
        .build()
}

/// The module `verdict run` executes
pub fn sample_module() -> Module {
    Module::new("samples").component(sample_tests())
}
