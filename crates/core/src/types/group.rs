use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

use super::entity::Entity;
use crate::error::{Error, Result};

// =============================================================================
// Group Definitions
// =============================================================================

/// A subtask as declared in a group's `tasks` list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubtaskDefinition {
    #[serde(default)]
    pub description: String,

    /// Role of the member this subtask is assigned to.
    #[serde(default)]
    pub agent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,

    /// Any other fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A group as declared in the `crews` list of a document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupDefinition {
    #[serde(default)]
    pub name: String,

    /// Declared member roles.
    #[serde(default)]
    pub agents: Vec<String>,

    #[serde(default)]
    pub tasks: Vec<SubtaskDefinition>,

    /// Execution process name; `sequential` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process: Option<String>,

    #[serde(default)]
    pub verbose: bool,

    /// Role of the coordinating member, required by the hierarchical process.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_role: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// =============================================================================
// Runtime Group
// =============================================================================

/// How the members of a group take on its subtasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Process {
    #[default]
    Sequential,
    Hierarchical,
}

impl Process {
    /// Parse a process name, treating absence as sequential.
    pub fn parse(name: Option<&str>) -> Result<Self> {
        match name {
            None | Some("sequential") => Ok(Self::Sequential),
            Some("hierarchical") => Ok(Self::Hierarchical),
            Some(other) => Err(Error::construction(format!("unknown process '{}'", other))),
        }
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Hierarchical => write!(f, "hierarchical"),
        }
    }
}

/// A subtask bound to the concrete member that performs it.
#[derive(Debug, Clone, Serialize)]
pub struct Subtask {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    /// The member performing this subtask, shared with the group's member list.
    pub agent: Arc<Entity>,
    pub attributes: Map<String, Value>,
}

impl Subtask {
    /// Bind a subtask definition to its member.
    pub fn bind(definition: &SubtaskDefinition, agent: Arc<Entity>) -> Self {
        Self {
            description: definition.description.clone(),
            expected_output: definition.expected_output.clone(),
            agent,
            attributes: definition.extra.clone(),
        }
    }
}

/// A named collection of members and the subtasks bound to them.
#[derive(Debug, Clone, Serialize)]
pub struct Group {
    pub name: String,
    pub process: Process,
    pub verbose: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_role: Option<String>,
    pub members: Vec<Arc<Entity>>,
    pub subtasks: Vec<Subtask>,
    pub attributes: Map<String, Value>,
}

impl Group {
    /// Build a group, validating its shape.
    ///
    /// Rejects a blank name, an unknown process, a subtask without a
    /// description, and a hierarchical group whose `manager_role` is not one
    /// of its members.
    pub fn try_new(
        definition: &GroupDefinition,
        members: Vec<Arc<Entity>>,
        subtasks: Vec<Subtask>,
    ) -> Result<Self> {
        if definition.name.trim().is_empty() {
            return Err(Error::construction("group name must not be empty"));
        }

        let process = Process::parse(definition.process.as_deref())?;

        if let Some(blank) = subtasks.iter().position(|t| t.description.trim().is_empty()) {
            return Err(Error::construction(format!(
                "subtask #{} of group '{}' has no description",
                blank, definition.name
            )));
        }

        if process == Process::Hierarchical {
            let manager = definition.manager_role.as_deref().ok_or_else(|| {
                Error::construction(format!(
                    "hierarchical group '{}' requires a manager_role",
                    definition.name
                ))
            })?;
            if !members.iter().any(|m| m.role() == manager) {
                return Err(Error::construction(format!(
                    "manager_role '{}' is not a member of group '{}'",
                    manager, definition.name
                )));
            }
        }

        Ok(Self {
            name: definition.name.clone(),
            process,
            verbose: definition.verbose,
            manager_role: definition.manager_role.clone(),
            members,
            subtasks,
            attributes: definition.extra.clone(),
        })
    }

    pub fn member(&self, role: &str) -> Option<&Arc<Entity>> {
        self.members.iter().find(|m| m.role() == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntityAttributes;
    use serde_json::json;

    fn entity(role: &str) -> Arc<Entity> {
        let entity = Entity::new(EntityAttributes {
            role: role.into(),
            goal: "g".into(),
            backstory: "b".into(),
            verbose: false,
            max_iter: None,
            max_rpm: None,
            allow_delegation: None,
            model_name: None,
            memory: None,
        })
        .unwrap();
        Arc::new(entity)
    }

    fn definition(value: Value) -> GroupDefinition {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_pass_through_fields() {
        let def = definition(json!({
            "name": "crew",
            "agents": ["writer"],
            "tasks": [{"description": "d", "agent": "writer", "async_execution": true}],
            "budget": 3
        }));

        assert_eq!(def.tasks[0].extra.get("async_execution"), Some(&json!(true)));
        assert_eq!(def.extra.get("budget"), Some(&json!(3)));

        let task = Subtask::bind(&def.tasks[0], entity("writer"));
        let group = Group::try_new(&def, vec![entity("writer")], vec![task]).unwrap();
        assert_eq!(group.process, Process::Sequential);
        assert_eq!(group.subtasks[0].attributes.get("async_execution"), Some(&json!(true)));
        assert_eq!(group.attributes.get("budget"), Some(&json!(3)));
    }

    #[test]
    fn test_blank_name_rejected() {
        let def = definition(json!({"agents": ["writer"]}));
        let err = Group::try_new(&def, vec![entity("writer")], vec![]).unwrap_err();
        assert!(matches!(err, Error::Construction(_)));
    }

    #[test]
    fn test_unknown_process_rejected() {
        let def = definition(json!({"name": "crew", "process": "parallel"}));
        let err = Group::try_new(&def, vec![entity("writer")], vec![]).unwrap_err();
        assert!(err.to_string().contains("parallel"));
    }

    #[test]
    fn test_hierarchical_requires_member_manager() {
        let def = definition(json!({"name": "crew", "process": "hierarchical"}));
        assert!(Group::try_new(&def, vec![entity("writer")], vec![]).is_err());

        let def = definition(json!({
            "name": "crew",
            "process": "hierarchical",
            "manager_role": "editor"
        }));
        assert!(Group::try_new(&def, vec![entity("writer")], vec![]).is_err());

        let group = Group::try_new(&def, vec![entity("writer"), entity("editor")], vec![]).unwrap();
        assert_eq!(group.process, Process::Hierarchical);
        assert!(group.member("editor").is_some());
    }

    #[test]
    fn test_blank_subtask_description_rejected() {
        let def = definition(json!({"name": "crew", "tasks": [{"agent": "writer"}]}));
        let task = Subtask::bind(&def.tasks[0], entity("writer"));
        assert!(Group::try_new(&def, vec![entity("writer")], vec![task]).is_err());
    }
}
