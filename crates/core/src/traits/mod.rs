//! Core traits for Crewkit.
//!
//! - `component`: the component contract (Component, ComponentFactory)
//! - `diagnostics`: where skip-and-continue reports are sent (DiagnosticSink)

pub mod component;
pub mod diagnostics;

pub use component::*;
pub use diagnostics::*;
