//! Repository port for task persistence and lookup.

use crate::case::domain::CaseId;
use crate::task::domain::{Task, TaskCode, Team, Version};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateCode`] when a task with the
    /// same code already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// `base` is the version the caller read before mutating; the write is
    /// applied only while the persisted version still matches it, so two
    /// racing transitions cannot silently overwrite each other.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist and [`TaskRepositoryError::StaleVersion`] when the persisted
    /// version no longer matches `base`.
    async fn update(&self, task: &Task, base: Version) -> TaskRepositoryResult<()>;

    /// Finds a task by code.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_code(&self, code: &TaskCode) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the full task collection, ordered by code.
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all tasks assigned to the given team, ordered by code.
    async fn list_by_team(&self, team: Team) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all tasks grouped under the given use-case, ordered by code.
    async fn list_by_case(&self, case: CaseId) -> TaskRepositoryResult<Vec<Task>>;

    /// Deletes a task by code.
    ///
    /// Dependency edges pointing at the deleted task are left dangling; the
    /// guard's dangling policy governs how they behave afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete_by_code(&self, code: &TaskCode) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same code already exists.
    #[error("duplicate task code: {0}")]
    DuplicateCode(TaskCode),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskCode),

    /// The write was based on an outdated read.
    #[error("stale write for task {code}: based on {base}, persisted is {found}")]
    StaleVersion {
        /// Code of the task the write targeted.
        code: TaskCode,
        /// Version the caller's mutation was based on.
        base: Version,
        /// Version actually persisted at write time.
        found: Version,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
