//! Component registry implementation.

use dashmap::DashMap;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use crewkit_core::{
    traits::{ComponentFactory, DiagnosticSink},
    Error, Result,
};
use crewkit_governance::TracingDiagnostics;

use crate::catalog::ModuleCatalog;
use crate::loader::{load_manifest, ManifestReport};

/// Summary of a registered component type.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentDescriptor {
    /// Name the type is registered under.
    pub name: String,

    /// Name the type reports for itself.
    pub type_name: String,

    pub description: String,

    /// JSON Schema for the construction config.
    pub parameters: serde_json::Value,
}

/// Name-keyed catalog of component types, backed by DashMap.
///
/// Registering an existing name replaces the previous type. Nothing is ever
/// removed.
pub struct ComponentRegistry {
    components: DashMap<String, Arc<dyn ComponentFactory>>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl ComponentRegistry {
    /// Create an empty registry reporting diagnostics through tracing.
    pub fn new() -> Self {
        Self {
            components: DashMap::new(),
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    /// Set the diagnostic sink.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Sink that skipped manifest records, and by default the factories, report to.
    pub fn diagnostics(&self) -> &Arc<dyn DiagnosticSink> {
        &self.diagnostics
    }

    /// Register a component type under `name`, replacing any previous entry.
    pub fn register(&self, name: impl Into<String>, factory: Arc<dyn ComponentFactory>) {
        let name = name.into();
        tracing::info!(component = %name, type_name = %factory.type_name(), "Registering component");

        if self.components.insert(name.clone(), factory).is_some() {
            tracing::debug!(component = %name, "Replaced previously registered component");
        }
    }

    /// Look up a component type.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ComponentFactory>> {
        self.components.get(name).map(|entry| entry.value().clone())
    }

    /// Look up a component type that must exist.
    pub fn require(&self, name: &str) -> Result<Arc<dyn ComponentFactory>> {
        self.get(name).ok_or_else(|| Error::component_not_found(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Snapshot of the registered names, in no particular order.
    pub fn list_names(&self) -> Vec<String> {
        self.components.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Describe every registered type, sorted by name.
    pub fn describe(&self) -> Vec<ComponentDescriptor> {
        let mut descriptors: Vec<_> = self
            .components
            .iter()
            .map(|entry| ComponentDescriptor {
                name: entry.key().clone(),
                type_name: entry.value().type_name().to_string(),
                description: entry.value().description().to_string(),
                parameters: entry.value().parameters(),
            })
            .collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    /// Get the number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Bulk-register the records of a manifest, resolving them in `catalog`.
    pub fn load_from_manifest(&self, path: &Path, catalog: &ModuleCatalog) -> Result<ManifestReport> {
        load_manifest(self, catalog, path)
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
