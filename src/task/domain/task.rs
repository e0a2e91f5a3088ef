//! Task aggregate root.

use super::{TaskCode, TaskDomainError, TaskId, TaskStatus, Team, Version};
use crate::case::domain::CaseId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A unit of work on the board.
///
/// Dependency references are weak: the set stores prerequisite codes only,
/// and resolving them against the current task collection is the caller's
/// concern. A referenced task may have been deleted since the edge was
/// recorded; such dangling codes are tolerated by the aggregate and handled
/// by the transition guard's dangling policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    code: TaskCode,
    case: Option<CaseId>,
    name: String,
    description: String,
    dependencies: BTreeSet<TaskCode>,
    status: TaskStatus,
    version: Version,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted task code.
    pub code: TaskCode,
    /// Persisted use-case assignment, if any.
    pub case: Option<CaseId>,
    /// Persisted task name.
    pub name: String,
    /// Persisted task description.
    pub description: String,
    /// Persisted dependency codes.
    pub dependencies: BTreeSet<TaskCode>,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted concurrency version.
    pub version: Version,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in the `Open` status.
    ///
    /// The initial status is not caller-selectable; every task enters the
    /// board through the backlog column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskName`] when the name is blank and
    /// [`TaskDomainError::SelfDependency`] when the dependency set contains
    /// the task's own code.
    pub fn new(
        code: TaskCode,
        case: Option<CaseId>,
        name: impl Into<String>,
        description: impl Into<String>,
        dependencies: BTreeSet<TaskCode>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let task_name = validated_name(name.into())?;
        if dependencies.contains(&code) {
            return Err(TaskDomainError::SelfDependency(code));
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            code,
            case,
            name: task_name,
            description: description.into(),
            dependencies,
            status: TaskStatus::Open,
            version: Version::INITIAL,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            code: data.code,
            case: data.case,
            name: data.name,
            description: data.description,
            dependencies: data.dependencies,
            status: data.status,
            version: data.version,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the internal task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the human-readable task code.
    #[must_use]
    pub const fn code(&self) -> &TaskCode {
        &self.code
    }

    /// Returns the team the task is assigned to, derived from its code.
    #[must_use]
    pub const fn team(&self) -> Team {
        self.code.team()
    }

    /// Returns the use-case the task is grouped under, if any.
    #[must_use]
    pub const fn case(&self) -> Option<CaseId> {
        self.case
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the prerequisite task codes.
    #[must_use]
    pub const fn dependencies(&self) -> &BTreeSet<TaskCode> {
        &self.dependencies
    }

    /// Returns the current workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the concurrency version of this in-memory view.
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Renames the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskName`] when the name is blank.
    pub fn rename(
        &mut self,
        name: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.name = validated_name(name.into())?;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the task description.
    pub fn describe(&mut self, description: impl Into<String>, clock: &impl Clock) {
        self.description = description.into();
        self.touch(clock);
    }

    /// Moves the task to another use-case, or out of any use-case.
    pub fn reassign_case(&mut self, case: Option<CaseId>, clock: &impl Clock) {
        self.case = case;
        self.touch(clock);
    }

    /// Replaces the dependency set.
    ///
    /// Cycle detection across the wider graph happens at the service layer;
    /// the aggregate only rejects the degenerate self-edge.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SelfDependency`] when the new set contains
    /// the task's own code.
    pub fn replace_dependencies(
        &mut self,
        dependencies: BTreeSet<TaskCode>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if dependencies.contains(&self.code) {
            return Err(TaskDomainError::SelfDependency(self.code.clone()));
        }
        self.dependencies = dependencies;
        self.touch(clock);
        Ok(())
    }

    /// Moves the task to the given status.
    ///
    /// Every directed transition is permitted unconditionally here; the
    /// dependency check lives in the transition guard and is advisory, so a
    /// confirmed close proceeds even with unresolved prerequisites.
    pub fn transition_to(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    /// Updates the mutation timestamp and bumps the concurrency version.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
        self.version = self.version.next();
    }
}

/// Trims and validates a task name.
fn validated_name(raw: String) -> Result<String, TaskDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTaskName);
    }
    Ok(trimmed.to_owned())
}
