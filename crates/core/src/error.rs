//! Error types for Crewkit.

use thiserror::Error;

/// Result type alias using Crewkit's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Crewkit.
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Document Errors
    // =========================================================================
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // =========================================================================
    // Component Errors
    // =========================================================================
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    #[error("Component '{component}' rejected its configuration: {reason}")]
    ComponentConstruction { component: String, reason: String },

    #[error("Component execution failed: {0}")]
    ComponentExecution(String),

    // =========================================================================
    // Assembly Errors
    // =========================================================================
    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),

    #[error("Group '{0}' has no resolvable members")]
    NoMembers(String),

    #[error("Group construction failed: {0}")]
    Construction(String),

    // =========================================================================
    // Generic Errors
    // =========================================================================
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a component not found error.
    pub fn component_not_found(name: impl Into<String>) -> Self {
        Self::ComponentNotFound(name.into())
    }

    /// Create a component construction error.
    pub fn component_construction(component: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ComponentConstruction {
            component: component.into(),
            reason: reason.into(),
        }
    }

    /// Create a component execution error.
    pub fn component_execution(msg: impl Into<String>) -> Self {
        Self::ComponentExecution(msg.into())
    }

    /// Create an invalid definition error.
    pub fn invalid_definition(msg: impl Into<String>) -> Self {
        Self::InvalidDefinition(msg.into())
    }

    /// Create a group construction error.
    pub fn construction(msg: impl Into<String>) -> Self {
        Self::Construction(msg.into())
    }
}
