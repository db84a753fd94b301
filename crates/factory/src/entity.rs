//! Entity materialization.

use std::path::Path;
use std::sync::Arc;

use crewkit_core::{
    document,
    traits::{Component, DiagnosticSink},
    types::{AssemblyOptions, AttachMode, Diagnostic, DiagnosticKind, Entity, EntityDefinition},
    Result,
};
use crewkit_registry::ComponentRegistry;

/// Document key holding entity definitions.
pub const ENTITIES_KEY: &str = "agents";

/// Turns entity definitions into live entities.
pub struct EntityFactory {
    definitions: Vec<EntityDefinition>,
    registry: Arc<ComponentRegistry>,
    options: AssemblyOptions,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl EntityFactory {
    /// Create a factory over already-loaded definitions.
    ///
    /// Diagnostics go to the registry's sink unless overridden.
    pub fn new(definitions: Vec<EntityDefinition>, registry: Arc<ComponentRegistry>) -> Self {
        let diagnostics = registry.diagnostics().clone();
        Self {
            definitions,
            registry,
            options: AssemblyOptions::default(),
            diagnostics,
        }
    }

    /// Load definitions from `path` and create a factory over them.
    pub fn from_path(path: &Path, registry: Arc<ComponentRegistry>) -> Result<Self> {
        Ok(Self::new(Self::load(path)?, registry))
    }

    /// Read the entity definitions of a document.
    ///
    /// A document without an `agents` key has no definitions.
    pub fn load(path: &Path) -> Result<Vec<EntityDefinition>> {
        let definitions: Vec<EntityDefinition> = document::read_collection(path, ENTITIES_KEY)?;
        tracing::debug!(path = %path.display(), count = definitions.len(), "Loaded entity definitions");
        Ok(definitions)
    }

    /// Set the assembly options.
    pub fn with_options(mut self, options: AssemblyOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the diagnostic sink.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn options(&self) -> AssemblyOptions {
        self.options
    }

    pub fn diagnostics(&self) -> &Arc<dyn DiagnosticSink> {
        &self.diagnostics
    }

    pub fn definitions(&self) -> &[EntityDefinition] {
        &self.definitions
    }

    /// Declared roles, in document order.
    pub fn roles(&self) -> Vec<&str> {
        self.definitions.iter().map(|d| d.role()).collect()
    }

    /// Build a new entity from `definition`.
    ///
    /// Components whose type is not registered are skipped with a
    /// diagnostic. A registered type that rejects its config fails the
    /// whole entity.
    pub fn materialize(&self, definition: &EntityDefinition) -> Result<Entity> {
        let mut entity = Entity::new(definition.attributes.clone())?;

        for spec in &definition.tools {
            let Some(factory) = self.registry.get(&spec.kind) else {
                self.diagnostics.report(Diagnostic::new(
                    DiagnosticKind::ComponentNotFound,
                    &spec.kind,
                    format!(
                        "entity '{}' references unregistered component type '{}', skipping it",
                        entity.role(),
                        spec.kind
                    ),
                ));
                continue;
            };

            let component: Arc<dyn Component> = Arc::from(factory.construct(&spec.config)?);

            match self.options.attach_mode {
                AttachMode::Wrapped => {
                    let label = if spec.name.is_empty() { &spec.kind } else { &spec.name };
                    entity.attach_component(label.clone(), component, spec.description.clone());
                }
                AttachMode::Raw => {
                    let label = component.name().to_string();
                    entity.attach_component(label, component, factory.description());
                }
            }
        }

        tracing::debug!(
            role = %entity.role(),
            components = entity.components().len(),
            "Materialized entity"
        );

        Ok(entity)
    }

    /// Materialize every definition, in order.
    pub fn materialize_all(&self) -> Result<Vec<Entity>> {
        self.definitions.iter().map(|d| self.materialize(d)).collect()
    }

    /// Materialize the first definition with the given role.
    ///
    /// Scans the definitions on every call and builds a fresh entity each
    /// time; nothing is indexed or cached.
    pub fn find_by_role(&self, role: &str) -> Result<Option<Entity>> {
        self.definitions
            .iter()
            .find(|d| d.role() == role)
            .map(|d| self.materialize(d))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewkit_core::Error;
    use crewkit_governance::DiagnosticLog;
    use crewkit_registry::register_builtins;
    use serde_json::json;

    fn definitions(value: serde_json::Value) -> Vec<EntityDefinition> {
        serde_json::from_value(value).unwrap()
    }

    fn factory(value: serde_json::Value) -> (EntityFactory, Arc<DiagnosticLog>) {
        let log = Arc::new(DiagnosticLog::new());
        let registry = ComponentRegistry::new().with_diagnostics(log.clone());
        register_builtins(&registry);
        (EntityFactory::new(definitions(value), Arc::new(registry)), log)
    }

    #[test]
    fn test_unknown_component_is_skipped() {
        let (factory, log) = factory(json!([{
            "role": "writer",
            "goal": "g",
            "backstory": "b",
            "tools": [{"type": "unknown", "name": "x", "description": "d", "config": {}}]
        }]));

        let entities = factory.materialize_all().unwrap();

        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].role(), "writer");
        assert_eq!(entities[0].attributes().goal, "g");
        assert!(entities[0].components().is_empty());
        assert_eq!(log.of_kind(DiagnosticKind::ComponentNotFound).len(), 1);
        assert_eq!(log.entries()[0].subject, "unknown");
    }

    #[test]
    fn test_components_attached_in_order() {
        let (factory, log) = factory(json!([{
            "role": "analyst",
            "goal": "g",
            "backstory": "b",
            "tools": [
                {"type": "calculator", "name": "math", "description": "numbers", "config": {"precision": 1}},
                {"type": "missing", "name": "gone", "description": "", "config": {}},
                {"type": "echo", "name": "say", "description": "repeat", "config": {}}
            ]
        }]));

        let entity = factory.materialize(&factory.definitions()[0]).unwrap();
        let labels: Vec<_> = entity.components().iter().map(|c| c.label.as_str()).collect();

        assert_eq!(labels, vec!["math", "say"]);
        assert_eq!(entity.component("math").unwrap().description, "numbers");
        assert_eq!(log.len(), 1);

        let output = entity
            .component("say")
            .unwrap()
            .component
            .run(json!({"message": "hi"}))
            .unwrap();
        assert_eq!(output.content, "Echo: hi");
    }

    #[test]
    fn test_raw_attach_mode() {
        let (factory, _log) = factory(json!([{
            "role": "analyst",
            "goal": "g",
            "backstory": "b",
            "tools": [{"type": "calculator", "name": "math", "description": "numbers"}]
        }]));
        let factory = factory.with_options(AssemblyOptions {
            attach_mode: AttachMode::Raw,
            ..AssemblyOptions::default()
        });

        let entity = factory.materialize(&factory.definitions()[0]).unwrap();
        let attached = &entity.components()[0];

        assert_eq!(attached.label, "calculator");
        assert_eq!(attached.description, "Perform basic arithmetic operations");
    }

    #[test]
    fn test_rejected_config_fails_entity() {
        let (factory, _log) = factory(json!([{
            "role": "clerk",
            "goal": "g",
            "backstory": "b",
            "tools": [{"type": "template", "name": "letter", "description": "", "config": {}}]
        }]));

        let err = factory.materialize_all().unwrap_err();
        assert!(matches!(err, Error::ComponentConstruction { .. }));
    }

    #[test]
    fn test_find_by_role_rebuilds() {
        let (factory, _log) = factory(json!([
            {"role": "writer", "goal": "first", "backstory": "b",
             "tools": [{"type": "echo", "name": "say", "description": "", "config": {}}]},
            {"role": "editor", "goal": "g", "backstory": "b"},
            {"role": "writer", "goal": "second", "backstory": "b"}
        ]));

        let first = factory.find_by_role("writer").unwrap().unwrap();
        let again = factory.find_by_role("writer").unwrap().unwrap();

        assert_eq!(first.attributes().goal, "first");
        assert!(!Arc::ptr_eq(
            &first.components()[0].component,
            &again.components()[0].component
        ));
        assert!(factory.find_by_role("Writer").unwrap().is_none());
        assert_eq!(factory.roles(), vec!["writer", "editor", "writer"]);
    }
}
