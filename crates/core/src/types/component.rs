use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Component Types
// =============================================================================

/// Operations a component type can expose.
///
/// A type is registrable only when it provides every capability in
/// [`Capability::REQUIRED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Build a component instance from a config mapping.
    Construct,
    /// Run a constructed instance against an input.
    Run,
}

impl Capability {
    /// The capability contract every registered component type must satisfy.
    pub const REQUIRED: [Capability; 2] = [Capability::Construct, Capability::Run];

    /// Required capabilities absent from `provided`.
    pub fn missing(provided: &[Capability]) -> Vec<Capability> {
        Self::REQUIRED
            .iter()
            .filter(|required| !provided.contains(*required))
            .copied()
            .collect()
    }
}

/// A component reference inside an entity definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentSpec {
    /// Registry key of the component type.
    #[serde(rename = "type")]
    pub kind: String,

    /// Label the component is attached under.
    #[serde(default)]
    pub name: String,

    /// Human-readable description kept as attachment metadata.
    #[serde(default)]
    pub description: String,

    /// Construction arguments passed to the component type.
    #[serde(default)]
    pub config: Map<String, Value>,
}

/// Output from running a component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentOutput {
    /// Whether the run was successful.
    pub success: bool,

    /// Output content.
    pub content: String,

    /// Optional structured data.
    pub data: Option<Value>,
}

impl ComponentOutput {
    /// Create a successful text output.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            success: true,
            content: content.into(),
            data: None,
        }
    }

    /// Attach structured data.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Create a failed output.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            content: message.into(),
            data: None,
        }
    }
}
