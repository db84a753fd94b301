#![deny(unused)]
//! Core types, traits, and error definitions for Crewkit.
//!
//! This crate provides the building blocks shared by the registry and the
//! factories: the error taxonomy, the definition and runtime data model,
//! the component contract and the document reader.

pub mod config;
pub mod document;
pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::{Component, ComponentFactory, DiagnosticSink, NoOpDiagnostics};
pub use types::{
    AssemblyOptions, AttachMode, AttachedComponent, Capability, ComponentOutput, ComponentSpec,
    Diagnostic, DiagnosticKind, Entity, EntityAttributes, EntityDefinition, Group,
    GroupDefinition, MemberResolution, Process, Subtask, SubtaskDefinition,
};
