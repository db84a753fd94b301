//! Diagnostic sinks.

use std::sync::{Mutex, MutexGuard};

use crewkit_core::traits::DiagnosticSink;
use crewkit_core::types::{Diagnostic, DiagnosticKind};

/// Sink that logs every diagnostic as a warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        tracing::warn!(
            kind = ?diagnostic.kind,
            subject = %diagnostic.subject,
            "{}",
            diagnostic.message
        );
    }
}

/// Sink that logs and keeps every diagnostic for later inspection.
pub struct DiagnosticLog {
    entries: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of all diagnostics in report order.
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Diagnostics of a single kind, in report order.
    pub fn of_kind(&self, kind: DiagnosticKind) -> Vec<Diagnostic> {
        self.lock().iter().filter(|d| d.kind == kind).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }
}

impl Default for DiagnosticLog {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticSink for DiagnosticLog {
    fn report(&self, diagnostic: Diagnostic) {
        TracingDiagnostics.report(diagnostic.clone());
        self.lock().push(diagnostic);
    }
}
