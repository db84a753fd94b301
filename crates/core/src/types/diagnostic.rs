use serde::{Deserialize, Serialize};
use std::fmt;

/// What a diagnostic reports as skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticKind {
    /// A manifest record could not be resolved or failed the capability check.
    ManifestEntrySkipped,
    /// An entity referenced a component type the registry does not know.
    ComponentNotFound,
    /// A declared member role matched no entity definition.
    UnresolvedMember,
    /// A subtask's assigned role matched no resolved member.
    UnmatchedSubtask,
    /// A whole group failed to assemble.
    GroupSkipped,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ManifestEntrySkipped => "manifest entry skipped",
            Self::ComponentNotFound => "component not found",
            Self::UnresolvedMember => "unresolved member",
            Self::UnmatchedSubtask => "unmatched subtask",
            Self::GroupSkipped => "group skipped",
        };
        f.write_str(s)
    }
}

/// An informational report of something skipped during loading or assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Name of the skipped item (component name, role, group name).
    pub subject: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            subject: subject.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}': {}", self.kind, self.subject, self.message)
    }
}
