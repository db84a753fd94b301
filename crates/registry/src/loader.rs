use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

use crewkit_core::{
    document,
    traits::ComponentFactory,
    types::{Capability, Diagnostic, DiagnosticKind},
    Result,
};

use crate::catalog::ModuleCatalog;
use crate::manifest::ManifestEntry;
use crate::registry::ComponentRegistry;

/// Outcome of loading a manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ManifestReport {
    /// Names registered, in manifest order.
    pub registered: Vec<String>,
    /// Records skipped with a diagnostic.
    pub skipped: usize,
}

/// Load a component manifest and register every record that resolves.
///
/// A record is skipped, with a diagnostic, when it is malformed, when its
/// `module`/`class` is not in the catalog, or when the resolved type lacks a
/// required capability. Only whole-document problems fail the load.
pub fn load_manifest(
    registry: &ComponentRegistry,
    catalog: &ModuleCatalog,
    path: &Path,
) -> Result<ManifestReport> {
    let records: Vec<Value> = document::read_list(path)?;
    tracing::debug!(path = %path.display(), records = records.len(), "Loading component manifest");

    let mut report = ManifestReport::default();

    for (index, record) in records.into_iter().enumerate() {
        let entry: ManifestEntry = match serde_json::from_value(record) {
            Ok(entry) => entry,
            Err(e) => {
                skip(registry, &mut report, format!("#{}", index), format!("malformed record: {}", e));
                continue;
            }
        };

        match resolve_entry(catalog, &entry) {
            Ok(factory) => {
                registry.register(entry.name.clone(), factory);
                report.registered.push(entry.name);
            }
            Err(reason) => {
                let subject = if entry.name.is_empty() {
                    format!("#{}", index)
                } else {
                    entry.name.clone()
                };
                skip(registry, &mut report, subject, reason);
            }
        }
    }

    tracing::info!(
        registered = report.registered.len(),
        skipped = report.skipped,
        "Component manifest loaded"
    );

    Ok(report)
}

fn resolve_entry(
    catalog: &ModuleCatalog,
    entry: &ManifestEntry,
) -> std::result::Result<Arc<dyn ComponentFactory>, String> {
    entry.validate()?;

    let factory = catalog
        .resolve(&entry.module, &entry.class)
        .map_err(|e| format!("cannot resolve '{}': {}", entry.qualified_path(), e))?;

    let missing = Capability::missing(factory.capabilities());
    if !missing.is_empty() {
        return Err(format!(
            "'{}' does not satisfy the component contract, missing {:?}",
            entry.qualified_path(),
            missing
        ));
    }

    Ok(factory)
}

fn skip(registry: &ComponentRegistry, report: &mut ManifestReport, subject: String, reason: String) {
    report.skipped += 1;
    registry
        .diagnostics()
        .report(Diagnostic::new(DiagnosticKind::ManifestEntrySkipped, subject, reason));
}
