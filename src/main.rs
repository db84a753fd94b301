#![deny(unused)]
//! Crewkit - configuration-driven assembly of agents, crews and tools.
//!
//! Loads the component registry, the entity and group documents named in the
//! application config, assembles everything and prints a JSON report to stdout.

use anyhow::Context;
use serde::Serialize;
use std::sync::Arc;

use crewkit_core::config::AppConfig;
use crewkit_core::types::{Diagnostic, Entity, Group};
use crewkit_factory::{EntityFactory, GroupFactory};
use crewkit_governance::DiagnosticLog;
use crewkit_registry::{
    register_builtins, ComponentDescriptor, ComponentRegistry, ManifestReport, ModuleCatalog,
};

#[derive(Serialize)]
struct AssemblyReport {
    components: Vec<ComponentDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    manifest: Option<ManifestReport>,
    entities: Vec<Entity>,
    groups: Vec<Group>,
    diagnostics: Vec<Diagnostic>,
}

fn main() -> anyhow::Result<()> {
    // An explicit config file may be passed as the only argument
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load_from(&path)
            .with_context(|| format!("Failed to load configuration from {}", path))?,
        None => AppConfig::load().context("Failed to load configuration")?,
    };

    crewkit_governance::configure_tracing(&config.logging)?;

    tracing::info!("Starting Crewkit v{}", env!("CARGO_PKG_VERSION"));

    // =========================================================================
    // Component registry
    // =========================================================================
    let diagnostics = Arc::new(DiagnosticLog::new());
    let registry = ComponentRegistry::new().with_diagnostics(diagnostics.clone());
    register_builtins(&registry);

    let manifest = match &config.documents.manifest_path {
        Some(path) => {
            let report = registry
                .load_from_manifest(path, &ModuleCatalog::with_builtins())
                .with_context(|| format!("Failed to load manifest {}", path.display()))?;
            Some(report)
        }
        None => None,
    };

    let registry = Arc::new(registry);
    tracing::info!(components = registry.len(), "Component registry initialized");

    // =========================================================================
    // Entities and groups
    // =========================================================================
    let agents_path = &config.documents.agents_path;
    let entities = EntityFactory::from_path(agents_path, registry.clone())
        .with_context(|| format!("Failed to load agents from {}", agents_path.display()))?
        .with_options(config.assembly);
    let entities = Arc::new(entities);

    let crews_path = &config.documents.crews_path;
    let groups = GroupFactory::from_path(crews_path, entities.clone())
        .with_context(|| format!("Failed to load crews from {}", crews_path.display()))?;

    let report = AssemblyReport {
        components: registry.describe(),
        manifest,
        entities: entities
            .materialize_all()
            .context("Failed to materialize agents")?,
        groups: groups.assemble_all(),
        diagnostics: diagnostics.take(),
    };

    tracing::info!(
        entities = report.entities.len(),
        groups = report.groups.len(),
        diagnostics = report.diagnostics.len(),
        "Assembly complete"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
