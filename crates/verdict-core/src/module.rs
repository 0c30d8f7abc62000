//! Module boundary - components, methods and their role markers
//!
//! Test code is declared through explicit registration instead of
//! attributes: every component is described by a builder that records its
//! constructor and its methods, each tagged with at most one [`Marker`].
//!
//! ```
//! use verdict_core::module::{Component, Module};
//!
//! #[derive(Default)]
//! struct Counter {
//!     value: i32,
//! }
//!
//! let module = Module::new("doc").component(
//!     Component::builder::<Counter>("Counter")
//!         .setup("setup", |c| {
//!             c.value = 1;
//!             Ok(())
//!         })
//!         .test("starts_at_one", |c| {
//!             anyhow::ensure!(c.value == 1, "expected 1, got {}", c.value);
//!             Ok(())
//!         })
//!         .build(),
//! );
//! assert_eq!(module.components().len(), 1);
//! ```

use crate::error::{DiscoveryError, DiscoveryResult};
use std::any::{type_name, Any};
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};

type Constructor = Box<dyn Fn() -> anyhow::Result<Box<dyn Any>>>;
type Body = Box<dyn Fn(&mut dyn Any) -> anyhow::Result<()>>;

/// Role of a method in the test lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Test,
    Setup,
    Teardown,
}

/// A freshly constructed component value, owned by one test execution
pub struct Instance(Box<dyn Any>);

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Instance(..)")
    }
}

/// A declared method of a component
pub struct Method {
    name: String,
    marker: Option<Marker>,
    body: Body,
}

impl Method {
    /// Method name, the part after the dot in a qualified name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The role marker, or `None` for an ordinary method
    pub fn marker(&self) -> Option<Marker> {
        self.marker
    }

    /// Whether the method carries `marker`
    pub fn is_marked(&self, marker: Marker) -> bool {
        self.marker == Some(marker)
    }

    /// Invoke the method on an instance
    ///
    /// Returned errors and panics are both reported as `Err` carrying the
    /// message of the underlying cause.
    pub fn invoke(&self, instance: &mut Instance) -> Result<(), String> {
        guarded(|| (self.body)(&mut *instance.0))
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("name", &self.name)
            .field("marker", &self.marker)
            .finish_non_exhaustive()
    }
}

/// A declared unit of test code: a constructor plus its methods
pub struct Component {
    name: String,
    constructor: Constructor,
    methods: Vec<Method>,
}

impl Component {
    /// Start declaring a component constructed with `T::default()`
    pub fn builder<T: Default + 'static>(name: impl Into<String>) -> ComponentBuilder<T> {
        ComponentBuilder::new(name, || Ok(T::default()))
    }

    /// Start declaring a component with a fallible constructor
    pub fn with_constructor<T, F>(name: impl Into<String>, constructor: F) -> ComponentBuilder<T>
    where
        T: 'static,
        F: Fn() -> anyhow::Result<T> + 'static,
    {
        ComponentBuilder::new(name, constructor)
    }

    /// Component name, the part before the dot in a qualified name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Methods in declaration order
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Whether any method carries the test marker
    pub fn has_tests(&self) -> bool {
        self.methods.iter().any(|m| m.is_marked(Marker::Test))
    }

    /// Construct a fresh instance
    ///
    /// Constructor errors and panics are reported as `Err` with the
    /// constructor's own message.
    pub fn instantiate(&self) -> Result<Instance, String> {
        guarded(|| (self.constructor)()).map(Instance)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("name", &self.name)
            .field("methods", &self.methods)
            .finish_non_exhaustive()
    }
}

/// Typed builder for a [`Component`]
pub struct ComponentBuilder<T> {
    name: String,
    constructor: Constructor,
    methods: Vec<Method>,
    _instance: PhantomData<fn() -> T>,
}

impl<T: 'static> ComponentBuilder<T> {
    fn new<F>(name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn() -> anyhow::Result<T> + 'static,
    {
        Self {
            name: name.into(),
            constructor: Box::new(move || constructor().map(|value| Box::new(value) as Box<dyn Any>)),
            methods: Vec::new(),
            _instance: PhantomData,
        }
    }

    /// Declare a test method
    pub fn test<F>(self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut T) -> anyhow::Result<()> + 'static,
    {
        self.declare(name, Some(Marker::Test), body)
    }

    /// Declare a setup method, run before every test on the same instance
    pub fn setup<F>(self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut T) -> anyhow::Result<()> + 'static,
    {
        self.declare(name, Some(Marker::Setup), body)
    }

    /// Declare a teardown method, run after every test on the same instance
    pub fn teardown<F>(self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut T) -> anyhow::Result<()> + 'static,
    {
        self.declare(name, Some(Marker::Teardown), body)
    }

    /// Declare an ordinary method with no role marker
    pub fn method<F>(self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut T) -> anyhow::Result<()> + 'static,
    {
        self.declare(name, None, body)
    }

    fn declare<F>(mut self, name: impl Into<String>, marker: Option<Marker>, body: F) -> Self
    where
        F: Fn(&mut T) -> anyhow::Result<()> + 'static,
    {
        let body: Body = Box::new(move |instance: &mut dyn Any| {
            let this = instance
                .downcast_mut::<T>()
                .ok_or_else(|| anyhow::anyhow!("instance is not a `{}`", type_name::<T>()))?;
            body(this)
        });
        self.methods.push(Method {
            name: name.into(),
            marker,
            body,
        });
        self
    }

    /// Finish the declaration
    pub fn build(self) -> Component {
        Component {
            name: self.name,
            constructor: self.constructor,
            methods: self.methods,
        }
    }
}

/// A loaded set of components, in declaration order
#[derive(Debug, Default)]
pub struct Module {
    name: String,
    components: Vec<Component>,
}

impl Module {
    /// Create an empty module
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: Vec::new(),
        }
    }

    /// Add a component (builder style)
    pub fn component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    /// Add a component in place
    pub fn register(&mut self, component: Component) -> &mut Self {
        self.components.push(component);
        self
    }

    /// Module name, used only in diagnostics
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All declared components, test-bearing or not
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Check that every qualified name this module can produce is unambiguous
    ///
    /// The module name is informational only and may be empty.
    pub fn validate(&self) -> DiscoveryResult<()> {
        let mut seen_components = HashSet::new();
        for component in &self.components {
            if component.name.is_empty() {
                return Err(DiscoveryError::UnnamedComponent {
                    module: self.name.clone(),
                });
            }
            if !seen_components.insert(component.name.as_str()) {
                return Err(DiscoveryError::duplicate_component(
                    &self.name,
                    &component.name,
                ));
            }

            let mut seen_methods = HashSet::new();
            for method in &component.methods {
                if method.name.is_empty() {
                    return Err(DiscoveryError::UnnamedMethod {
                        component: component.name.clone(),
                    });
                }
                if !seen_methods.insert(method.name.as_str()) {
                    return Err(DiscoveryError::duplicate_method(
                        &component.name,
                        &method.name,
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Run `f`, turning both its error and any panic into a cause message
fn guarded<R>(f: impl FnOnce() -> anyhow::Result<R>) -> Result<R, String> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(err.to_string()),
        Err(payload) => Err(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panicked with a non-string payload".to_string()
    }
}
