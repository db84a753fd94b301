//! Component traits.

use serde_json::{Map, Value};

use crate::error::Result;
use crate::types::{Capability, ComponentOutput};

/// A constructed capability unit attachable to an entity.
pub trait Component: Send + Sync {
    /// Get the name of the component.
    fn name(&self) -> &str;

    /// Run the component with the given input.
    fn run(&self, input: Value) -> Result<ComponentOutput>;
}

/// A component type: the thing the registry maps names to.
pub trait ComponentFactory: Send + Sync {
    /// Get the unique type name.
    fn type_name(&self) -> &str;

    /// Get the human-readable description.
    fn description(&self) -> &str;

    /// Get the JSON Schema for the construction config.
    fn parameters(&self) -> Value;

    /// Operations this type exposes.
    fn capabilities(&self) -> &[Capability] {
        &[Capability::Construct, Capability::Run]
    }

    /// Build a component instance from a config mapping.
    fn construct(&self, config: &Map<String, Value>) -> Result<Box<dyn Component>>;
}
