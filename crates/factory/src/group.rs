//! Group assembly.

use std::path::Path;
use std::sync::Arc;

use crewkit_core::{
    document,
    traits::DiagnosticSink,
    types::{
        Diagnostic, DiagnosticKind, Entity, Group, GroupDefinition, MemberResolution, Subtask,
    },
    Error, Result,
};

use crate::entity::EntityFactory;

/// Document key holding group definitions.
pub const GROUPS_KEY: &str = "crews";

/// Resolves group membership and subtask assignment.
pub struct GroupFactory {
    definitions: Vec<GroupDefinition>,
    entities: Arc<EntityFactory>,
    member_resolution: MemberResolution,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl GroupFactory {
    /// Create a factory over already-loaded definitions.
    ///
    /// Member resolution and the diagnostic sink are inherited from `entities`.
    pub fn new(definitions: Vec<GroupDefinition>, entities: Arc<EntityFactory>) -> Self {
        let member_resolution = entities.options().member_resolution;
        let diagnostics = entities.diagnostics().clone();
        Self {
            definitions,
            entities,
            member_resolution,
            diagnostics,
        }
    }

    /// Load definitions from `path` and create a factory over them.
    pub fn from_path(path: &Path, entities: Arc<EntityFactory>) -> Result<Self> {
        Ok(Self::new(Self::load(path)?, entities))
    }

    /// Read the group definitions of a document.
    ///
    /// A document without a `crews` key has no definitions.
    pub fn load(path: &Path) -> Result<Vec<GroupDefinition>> {
        let definitions: Vec<GroupDefinition> = document::read_collection(path, GROUPS_KEY)?;
        tracing::debug!(path = %path.display(), count = definitions.len(), "Loaded group definitions");
        Ok(definitions)
    }

    /// Set how member roles are collected.
    ///
    /// Components are attached by the entity factory, so its attach mode
    /// stays in effect.
    pub fn with_member_resolution(mut self, member_resolution: MemberResolution) -> Self {
        self.member_resolution = member_resolution;
        self
    }

    /// Set the diagnostic sink.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn definitions(&self) -> &[GroupDefinition] {
        &self.definitions
    }

    /// Assemble one group.
    ///
    /// Unresolved members and unmatched subtasks are dropped with a
    /// diagnostic. The group itself fails with `NoMembers` when no member
    /// resolves, or with `Construction` when its shape is rejected; either
    /// failure is also reported as a diagnostic.
    pub fn assemble(&self, definition: &GroupDefinition) -> Result<Group> {
        let assembled = self.try_assemble(definition);

        match &assembled {
            Ok(group) => tracing::info!(
                group = %group.name,
                members = group.members.len(),
                subtasks = group.subtasks.len(),
                "Assembled group"
            ),
            Err(e) => self.diagnostics.report(Diagnostic::new(
                DiagnosticKind::GroupSkipped,
                &definition.name,
                e.to_string(),
            )),
        }

        assembled
    }

    /// Assemble every group, omitting the ones that fail.
    pub fn assemble_all(&self) -> Vec<Group> {
        self.definitions
            .iter()
            .filter_map(|d| self.assemble(d).ok())
            .collect()
    }

    /// Assemble the first group with the given name.
    ///
    /// Like `EntityFactory::find_by_role`, this scans and rebuilds on every call.
    pub fn find_by_name(&self, name: &str) -> Result<Option<Group>> {
        self.definitions
            .iter()
            .find(|d| d.name == name)
            .map(|d| self.assemble(d))
            .transpose()
    }

    fn try_assemble(&self, definition: &GroupDefinition) -> Result<Group> {
        let mut members: Vec<Arc<Entity>> = Vec::new();

        for role in self.member_roles(definition) {
            match self.entities.find_by_role(role)? {
                Some(entity) => members.push(Arc::new(entity)),
                None => self.diagnostics.report(Diagnostic::new(
                    DiagnosticKind::UnresolvedMember,
                    role,
                    format!(
                        "group '{}' declares role '{}' but no entity has it",
                        definition.name, role
                    ),
                )),
            }
        }

        if members.is_empty() {
            return Err(Error::NoMembers(definition.name.clone()));
        }

        let mut subtasks = Vec::with_capacity(definition.tasks.len());

        for (index, task) in definition.tasks.iter().enumerate() {
            let assignee = task
                .agent
                .as_deref()
                .and_then(|role| members.iter().find(|m| m.role() == role));

            match assignee {
                Some(member) => subtasks.push(Subtask::bind(task, member.clone())),
                None => {
                    let subject = task.agent.clone().unwrap_or_else(|| format!("#{}", index));
                    self.diagnostics.report(Diagnostic::new(
                        DiagnosticKind::UnmatchedSubtask,
                        subject,
                        format!(
                            "subtask #{} of group '{}' is not assigned to any member, dropping it",
                            index, definition.name
                        ),
                    ));
                }
            }
        }

        Group::try_new(definition, members, subtasks)
    }

    /// Member roles to resolve, in resolution order.
    ///
    /// Declared roles are taken as given, repeats included. Implicit
    /// resolution collects each referenced role once.
    fn member_roles<'a>(&self, definition: &'a GroupDefinition) -> Vec<&'a str> {
        let declared = definition.agents.iter().map(String::as_str);

        match self.member_resolution {
            MemberResolution::Declared => declared.collect(),
            MemberResolution::Implicit => {
                let mut roles: Vec<&'a str> = Vec::new();
                for role in definition
                    .tasks
                    .iter()
                    .filter_map(|t| t.agent.as_deref())
                    .chain(declared)
                {
                    if !roles.contains(&role) {
                        roles.push(role);
                    }
                }
                roles
            }
        }
    }
}
