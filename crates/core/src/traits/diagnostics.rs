use crate::types::Diagnostic;

/// Receiver for skip-and-continue reports.
pub trait DiagnosticSink: Send + Sync {
    /// Report a diagnostic.
    fn report(&self, diagnostic: Diagnostic);
}

/// No-op implementation for testing/default.
pub struct NoOpDiagnostics;

impl DiagnosticSink for NoOpDiagnostics {
    fn report(&self, _diagnostic: Diagnostic) {}
}
