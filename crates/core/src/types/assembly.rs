use serde::{Deserialize, Serialize};

/// How constructed components are attached to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachMode {
    /// Attach under the label and description given in the definition.
    #[default]
    Wrapped,
    /// Attach under the component's own name, described by its type.
    Raw,
}

/// Where a group's member roles come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberResolution {
    /// The group's declared `agents` list.
    #[default]
    Declared,
    /// Roles referenced by the group's subtasks, then any declared roles not
    /// already referenced.
    Implicit,
}

/// Switches between the assembly behaviors a document may rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyOptions {
    pub attach_mode: AttachMode,
    pub member_resolution: MemberResolution,
}
