//! verdict core - test discovery and execution engine
//!
//! Provides the engine behind the `verdict` command:
//! - Explicit registration of test components and their lifecycle methods
//! - Discovery of test-bearing components
//! - Sequential execution with setup/teardown and per-test failure isolation
//! - Result aggregation into a run summary

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod discovery;
pub mod error;
pub mod executor;
pub mod module;
pub mod result;
pub mod runner;

#[cfg(test)]
mod test_support;

// Re-export main types
pub use discovery::{discover_components, TestPlan, TestSuite};
pub use error::{DiscoveryError, DiscoveryResult, LifecycleError};
pub use executor::Executor;
pub use module::{Component, ComponentBuilder, Instance, Marker, Method, Module};
pub use result::{TestResult, TestSummary};
pub use runner::TestRunner;
