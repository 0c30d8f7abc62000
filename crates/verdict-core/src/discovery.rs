//! Test discovery - find test-bearing components in a module

use crate::error::DiscoveryResult;
use crate::module::{Component, Marker, Method, Module};
use tracing::warn;

/// A component's methods sorted into lifecycle roles
#[derive(Debug)]
pub struct TestPlan<'m> {
    /// The component the methods belong to
    pub component: &'m Component,
    /// Test methods in declaration order
    pub tests: Vec<&'m Method>,
    /// First declared setup method
    pub setup: Option<&'m Method>,
    /// First declared teardown method
    pub teardown: Option<&'m Method>,
}

impl<'m> TestPlan<'m> {
    /// Partition a component's methods by marker
    ///
    /// Only the first setup and the first teardown are used. Any further
    /// ones are reported and ignored.
    pub fn for_component(component: &'m Component) -> Self {
        let tests = marked(component, Marker::Test);
        let setup = first_of(component, Marker::Setup);
        let teardown = first_of(component, Marker::Teardown);

        Self {
            component,
            tests,
            setup,
            teardown,
        }
    }

    /// `Component.method`
    pub fn qualified_name(&self, method: &Method) -> String {
        format!("{}.{}", self.component.name(), method.name())
    }

    /// Qualified names of the tests, in the order they will run
    pub fn test_names(&self) -> Vec<String> {
        self.tests.iter().map(|m| self.qualified_name(m)).collect()
    }
}

fn marked(component: &Component, marker: Marker) -> Vec<&Method> {
    component
        .methods()
        .iter()
        .filter(|m| m.is_marked(marker))
        .collect()
}

fn first_of(component: &Component, marker: Marker) -> Option<&Method> {
    let mut candidates = marked(component, marker).into_iter();
    let first = candidates.next();

    let ignored: Vec<_> = candidates.map(Method::name).collect();
    if !ignored.is_empty() {
        warn!(
            component = component.name(),
            role = ?marker,
            ?ignored,
            "multiple methods carry the same lifecycle marker; only the first is used"
        );
    }

    first
}

/// Components with at least one test method, in declaration order
///
/// Fails only when the module itself is malformed.
pub fn discover_components(module: &Module) -> DiscoveryResult<Vec<&Component>> {
    module.validate()?;

    Ok(module
        .components()
        .iter()
        .filter(|c| c.has_tests())
        .collect())
}

/// All discovered plans of a module
#[derive(Debug, Default)]
pub struct TestSuite<'m> {
    pub plans: Vec<TestPlan<'m>>,
}

impl<'m> TestSuite<'m> {
    /// Discover every test-bearing component of a module
    pub fn discover(module: &'m Module) -> DiscoveryResult<Self> {
        let plans = discover_components(module)?
            .into_iter()
            .map(TestPlan::for_component)
            .collect();
        Ok(Self { plans })
    }

    /// Qualified names of every test, in execution order
    pub fn test_names(&self) -> Vec<String> {
        self.plans.iter().flat_map(TestPlan::test_names).collect()
    }

    /// Whether no component declares a test
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Number of test methods across all plans
    pub fn len(&self) -> usize {
        self.plans.iter().map(|p| p.tests.len()).sum()
    }
}
