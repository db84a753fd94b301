//! Core type definitions for Crewkit.
//!
//! Definitions are the persisted, immutable shapes read from documents;
//! entities, groups and subtasks are the runtime objects materialized from them.

pub mod assembly;
pub mod component;
pub mod diagnostic;
pub mod entity;
pub mod group;

pub use assembly::*;
pub use component::*;
pub use diagnostic::*;
pub use entity::*;
pub use group::*;
