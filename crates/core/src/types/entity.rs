use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::component::ComponentSpec;
use crate::error::{Error, Result};
use crate::traits::Component;

// =============================================================================
// Entity Definitions
// =============================================================================

/// Recognized entity attributes, copied verbatim onto every materialized entity.
///
/// Keys outside this set are ignored when a document is read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityAttributes {
    /// Unique role within a document; the key used for task assignment.
    pub role: String,
    pub goal: String,
    pub backstory: String,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iter: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rpm: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_delegation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<Value>,
}

/// An entity as declared in the `agents` list of a document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityDefinition {
    #[serde(flatten)]
    pub attributes: EntityAttributes,

    /// Components to construct and attach, in declaration order.
    #[serde(default)]
    pub tools: Vec<ComponentSpec>,
}

impl EntityDefinition {
    pub fn role(&self) -> &str {
        &self.attributes.role
    }
}

// =============================================================================
// Runtime Entity
// =============================================================================

/// A component instance attached to an entity.
#[derive(Clone, Serialize)]
pub struct AttachedComponent {
    /// Label the component is reachable under.
    pub label: String,
    pub description: String,
    /// Name reported by the component instance.
    pub kind: String,
    #[serde(skip)]
    pub component: Arc<dyn Component>,
}

impl fmt::Debug for AttachedComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachedComponent")
            .field("label", &self.label)
            .field("description", &self.description)
            .field("kind", &self.kind)
            .finish()
    }
}

/// A materialized worker: role, attributes and attached components.
#[derive(Debug, Clone, Serialize)]
pub struct Entity {
    #[serde(flatten)]
    attributes: EntityAttributes,
    components: Vec<AttachedComponent>,
}

impl Entity {
    /// Create an entity with no components attached.
    ///
    /// Fails when the role is blank, since role is the only key groups can
    /// resolve members by.
    pub fn new(attributes: EntityAttributes) -> Result<Self> {
        if attributes.role.trim().is_empty() {
            return Err(Error::invalid_definition("entity role must not be empty"));
        }
        Ok(Self {
            attributes,
            components: Vec::new(),
        })
    }

    pub fn role(&self) -> &str {
        &self.attributes.role
    }

    pub fn attributes(&self) -> &EntityAttributes {
        &self.attributes
    }

    /// Attach a component under `label`, keeping `description` as metadata.
    pub fn attach_component(
        &mut self,
        label: impl Into<String>,
        component: Arc<dyn Component>,
        description: impl Into<String>,
    ) {
        let kind = component.name().to_string();
        self.components.push(AttachedComponent {
            label: label.into(),
            description: description.into(),
            kind,
            component,
        });
    }

    pub fn components(&self) -> &[AttachedComponent] {
        &self.components
    }

    /// Find an attached component by its label.
    pub fn component(&self, label: &str) -> Option<&AttachedComponent> {
        self.components.iter().find(|c| c.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ComponentOutput;

    struct Noop;

    impl Component for Noop {
        fn name(&self) -> &str {
            "noop"
        }

        fn run(&self, _input: Value) -> Result<ComponentOutput> {
            Ok(ComponentOutput::text(""))
        }
    }

    fn attributes(role: &str) -> EntityAttributes {
        EntityAttributes {
            role: role.into(),
            goal: "g".into(),
            backstory: "b".into(),
            verbose: false,
            max_iter: None,
            max_rpm: None,
            allow_delegation: None,
            model_name: None,
            memory: None,
        }
    }

    #[test]
    fn test_definition_ignores_unknown_keys() {
        let def: EntityDefinition = serde_json::from_value(serde_json::json!({
            "role": "writer",
            "goal": "g",
            "backstory": "b",
            "max_iter": 5,
            "favourite_colour": "blue"
        }))
        .unwrap();

        assert_eq!(def.role(), "writer");
        assert_eq!(def.attributes.max_iter, Some(5));
        assert!(!def.attributes.verbose);
        assert!(def.tools.is_empty());
    }

    #[test]
    fn test_blank_role_rejected() {
        let err = Entity::new(attributes("  ")).unwrap_err();
        assert!(matches!(err, Error::InvalidDefinition(_)));
    }

    #[test]
    fn test_attach_component() {
        let mut entity = Entity::new(attributes("writer")).unwrap();
        entity.attach_component("scratch", Arc::new(Noop), "does nothing");

        assert_eq!(entity.components().len(), 1);
        let attached = entity.component("scratch").unwrap();
        assert_eq!(attached.kind, "noop");
        assert_eq!(attached.description, "does nothing");
        assert!(entity.component("missing").is_none());
    }
}
