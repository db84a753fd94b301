#![deny(unused)]
//! Component registry for Crewkit.
//!
//! This crate provides:
//! - The name-keyed component registry
//! - A module catalog standing in for import-by-path plugin loading
//! - Manifest loading into the registry
//! - Built-in components (echo, calculator, template)

pub mod builtin;
pub mod catalog;
pub mod loader;
pub mod manifest;
pub mod registry;

pub use builtin::*;
pub use catalog::ModuleCatalog;
pub use loader::{load_manifest, ManifestReport};
pub use manifest::ManifestEntry;
pub use registry::{ComponentDescriptor, ComponentRegistry};
