#![deny(unused)]
//! Observability for Crewkit.
//!
//! This crate provides:
//! - Tracing subscriber setup
//! - Diagnostic sinks (tracing-backed and in-memory log)

pub mod diagnostics;
pub mod tracing_layer;

pub use diagnostics::{DiagnosticLog, TracingDiagnostics};
pub use tracing_layer::configure_tracing;
