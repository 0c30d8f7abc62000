//! Engine error types

use thiserror::Error;

pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// A module that cannot be inspected. Fatal to the whole run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    #[error("Module '{module}' declares a component with no name")]
    UnnamedComponent { module: String },

    #[error("Module '{module}' declares component '{component}' more than once")]
    DuplicateComponent { module: String, component: String },

    #[error("Component '{component}' declares a method with no name")]
    UnnamedMethod { component: String },

    #[error("Component '{component}' declares method '{method}' more than once")]
    DuplicateMethod { component: String, method: String },
}

impl DiscoveryError {
    /// Create a duplicate component error
    pub fn duplicate_component(module: impl Into<String>, component: impl Into<String>) -> Self {
        Self::DuplicateComponent {
            module: module.into(),
            component: component.into(),
        }
    }

    /// Create a duplicate method error
    pub fn duplicate_method(component: impl Into<String>, method: impl Into<String>) -> Self {
        Self::DuplicateMethod {
            component: component.into(),
            method: method.into(),
        }
    }
}

/// A failure raised while driving one test through its lifecycle.
///
/// These never escape the executor: the first three become the failure
/// message of a `TestResult`, teardown failures are only logged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Could not instantiate '{component}': {cause}")]
    Instantiation { component: String, cause: String },

    #[error("Setup failed for '{test}': {cause}")]
    Setup { test: String, cause: String },

    #[error("Test '{test}' failed: {cause}")]
    Test { test: String, cause: String },

    #[error("Teardown failed for '{test}': {cause}")]
    Teardown { test: String, cause: String },
}

impl LifecycleError {
    /// The underlying cause, without the stage prefix
    pub fn cause(&self) -> &str {
        match self {
            Self::Instantiation { cause, .. }
            | Self::Setup { cause, .. }
            | Self::Test { cause, .. }
            | Self::Teardown { cause, .. } => cause,
        }
    }

    /// Lifecycle stage name, used as a structured log field
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Instantiation { .. } => "instantiation",
            Self::Setup { .. } => "setup",
            Self::Test { .. } => "test",
            Self::Teardown { .. } => "teardown",
        }
    }
}
