#![deny(unused)]
//! Entity and group factories for Crewkit.
//!
//! `EntityFactory` materializes entity definitions, resolving their
//! components through a `ComponentRegistry`. `GroupFactory` resolves group
//! members through an `EntityFactory` and binds subtasks to them by role.

pub mod entity;
pub mod group;

pub use crewkit_core::types::{AssemblyOptions, AttachMode, MemberResolution};
pub use entity::EntityFactory;
pub use group::GroupFactory;
