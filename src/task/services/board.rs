//! Board orchestration service.
//!
//! The service wires the transition guard between user intent and the
//! repository: a requested status change either applies immediately or
//! comes back as a pending transition carrying the blocking set, to be
//! confirmed or discarded by the caller. All mutation paths run through a
//! single writer lock, and every write carries the version it was based on.

use crate::case::domain::CaseId;
use crate::task::{
    domain::{
        BlockingSet, DanglingPolicy, DependencyGraph, GraphError, Task, TaskCode, TaskDomainError,
        TaskIndex, TaskStatus, Team, TransitionGuard,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::collections::BTreeSet;
use std::num::NonZeroU64;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Request payload for creating a task.
///
/// The initial status is not part of the request; every task starts in the
/// backlog column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    team: Team,
    case: Option<CaseId>,
    name: String,
    description: String,
    dependencies: BTreeSet<TaskCode>,
}

impl CreateTaskRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(team: Team, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            team,
            case: None,
            name: name.into(),
            description: description.into(),
            dependencies: BTreeSet::new(),
        }
    }

    /// Groups the task under a use-case.
    #[must_use]
    pub const fn with_case(mut self, case: CaseId) -> Self {
        self.case = Some(case);
        self
    }

    /// Sets prerequisite task codes.
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: impl IntoIterator<Item = TaskCode>) -> Self {
        self.dependencies = dependencies.into_iter().collect();
        self
    }
}

/// Partial update applied to an existing task.
///
/// Absent fields are left untouched. Status is deliberately not part of an
/// edit; status changes go through the transition guard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    name: Option<String>,
    description: Option<String>,
    case: Option<Option<CaseId>>,
    dependencies: Option<BTreeSet<TaskCode>>,
}

impl TaskEdit {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the task.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Moves the task to another use-case; `None` clears the assignment.
    #[must_use]
    pub const fn with_case(mut self, case: Option<CaseId>) -> Self {
        self.case = Some(case);
        self
    }

    /// Replaces the dependency set.
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: impl IntoIterator<Item = TaskCode>) -> Self {
        self.dependencies = Some(dependencies.into_iter().collect());
        self
    }
}

/// Outcome of a requested status transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Nothing blocked the change; it has been applied and persisted.
    Applied(Task),
    /// Unresolved prerequisites were found; the change is withheld until
    /// the caller confirms it.
    ConfirmationRequired(PendingTransition),
}

/// A withheld status change awaiting user confirmation.
///
/// Carries the task snapshot the guard evaluated, so a confirmation is
/// applied against the version the user actually saw; an intervening write
/// makes the confirmation stale rather than silently overwriting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransition {
    task: Task,
    target: TaskStatus,
    blockers: BlockingSet,
}

impl PendingTransition {
    /// Returns the task the transition targets, as evaluated.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the requested target status.
    #[must_use]
    pub const fn target(&self) -> TaskStatus {
        self.target
    }

    /// Returns the blocking set surfaced to the user.
    #[must_use]
    pub const fn blockers(&self) -> &BlockingSet {
        &self.blockers
    }
}

/// Tasks of one team grouped into the three board columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardSnapshot {
    open: Vec<Task>,
    in_progress: Vec<Task>,
    closed: Vec<Task>,
}

impl BoardSnapshot {
    fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut snapshot = Self::default();
        for task in tasks {
            match task.status() {
                TaskStatus::Open => snapshot.open.push(task),
                TaskStatus::InProgress => snapshot.in_progress.push(task),
                TaskStatus::Closed => snapshot.closed.push(task),
            }
        }
        snapshot
    }

    /// Returns the column for the given status, in code order.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Open => &self.open,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Closed => &self.closed,
        }
    }

    /// Returns the total number of tasks across all columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.open.len() + self.in_progress.len() + self.closed.len()
    }

    /// Returns `true` when the board holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The dependency edge set was rejected.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// A dependency code resolves to no known task.
    ///
    /// Only raised under [`DanglingPolicy::Strict`]; the permissive policy
    /// accepts unknown codes and skips them during guard evaluation.
    #[error("unknown dependency code: {0}")]
    UnknownDependency(TaskCode),
}

/// Result type for board service operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Board orchestration service.
#[derive(Clone)]
pub struct BoardService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    guard: TransitionGuard,
    writer: Arc<Mutex<()>>,
}

impl<R, C> BoardService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a board service with the default permissive guard.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self::with_guard(repository, clock, TransitionGuard::default())
    }

    /// Creates a board service with an explicitly configured guard.
    #[must_use]
    pub fn with_guard(repository: Arc<R>, clock: Arc<C>, guard: TransitionGuard) -> Self {
        Self {
            repository,
            clock,
            guard,
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the configured transition guard.
    #[must_use]
    pub const fn guard(&self) -> TransitionGuard {
        self.guard
    }

    /// Creates a new task, allocating the next code for its team.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] when the name is invalid, the dependency set
    /// is rejected, or persistence fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> BoardResult<Task> {
        let _writer = self.writer.lock().await;
        let board = self.repository.list_all().await?;
        let code = next_code(&board, request.team);
        self.validate_dependencies(&board, &code, &request.dependencies)?;

        let task = Task::new(
            code,
            request.case,
            request.name,
            request.description,
            request.dependencies,
            &*self.clock,
        )?;
        self.repository.store(&task).await?;
        tracing::debug!("created task {} ({})", task.code(), task.name());
        Ok(task)
    }

    /// Applies a partial edit to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Repository`] with
    /// [`TaskRepositoryError::NotFound`] when the task does not exist,
    /// [`BoardError::Graph`] when the new edge set is rejected, or other
    /// [`BoardError`] variants for validation and persistence failures.
    pub async fn edit_task(&self, code: &TaskCode, edit: TaskEdit) -> BoardResult<Task> {
        let _writer = self.writer.lock().await;
        let board = self.repository.list_all().await?;
        let mut task = find_in_board(&board, code)?;
        let base = task.version();

        if let Some(name) = edit.name {
            task.rename(name, &*self.clock)?;
        }
        if let Some(description) = edit.description {
            task.describe(description, &*self.clock);
        }
        if let Some(case) = edit.case {
            task.reassign_case(case, &*self.clock);
        }
        if let Some(dependencies) = edit.dependencies {
            self.validate_dependencies(&board, code, &dependencies)?;
            task.replace_dependencies(dependencies, &*self.clock)?;
        }

        self.repository.update(&task, base).await?;
        Ok(task)
    }

    /// Requests a status transition, running the guard first.
    ///
    /// An empty blocking set applies the change immediately; otherwise the
    /// change is withheld and returned as a [`PendingTransition`] for the
    /// caller's confirmation surface. Cancelling is simply dropping the
    /// pending value: no mutation has happened yet.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Repository`] with
    /// [`TaskRepositoryError::NotFound`] when the task does not exist, or
    /// when persistence of an immediately applied change fails.
    pub async fn request_transition(
        &self,
        code: &TaskCode,
        target: TaskStatus,
    ) -> BoardResult<TransitionOutcome> {
        let board = self.repository.list_all().await?;
        let task = find_in_board(&board, code)?;
        let blockers = self
            .guard
            .evaluate(&task, target, &TaskIndex::from_tasks(&board));

        if blockers.is_clear() {
            let applied = self.apply(task, target).await?;
            return Ok(TransitionOutcome::Applied(applied));
        }

        tracing::debug!(
            "transition of {} to {} blocked by {} unresolved dependencies",
            code,
            target,
            blockers.len()
        );
        Ok(TransitionOutcome::ConfirmationRequired(PendingTransition {
            task,
            target,
            blockers,
        }))
    }

    /// Applies a transition the user has explicitly confirmed.
    ///
    /// The guard is advisory: the confirmed change proceeds even though its
    /// blocking set was non-empty. The write is still version-checked
    /// against the snapshot the user confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Repository`] with
    /// [`TaskRepositoryError::StaleVersion`] when the task changed since
    /// the confirmation was offered.
    pub async fn confirm_transition(&self, pending: PendingTransition) -> BoardResult<Task> {
        self.apply(pending.task, pending.target).await
    }

    /// Deletes a task by code.
    ///
    /// Dependency edges pointing at the deleted task are left dangling.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Repository`] with
    /// [`TaskRepositoryError::NotFound`] when the task does not exist.
    pub async fn delete_task(&self, code: &TaskCode) -> BoardResult<()> {
        let _writer = self.writer.lock().await;
        self.repository.delete_by_code(code).await?;
        tracing::debug!("deleted task {code}");
        Ok(())
    }

    /// Finds a task by code.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Repository`] when the lookup fails.
    pub async fn get_task(&self, code: &TaskCode) -> BoardResult<Option<Task>> {
        Ok(self.repository.find_by_code(code).await?)
    }

    /// Returns a team's tasks grouped into the three board columns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Repository`] when the listing fails.
    pub async fn board_snapshot(&self, team: Team) -> BoardResult<BoardSnapshot> {
        let tasks = self.repository.list_by_team(team).await?;
        Ok(BoardSnapshot::from_tasks(tasks))
    }

    /// Returns all tasks grouped under the given use-case.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Repository`] when the listing fails.
    pub async fn tasks_for_case(&self, case: CaseId) -> BoardResult<Vec<Task>> {
        Ok(self.repository.list_by_case(case).await?)
    }

    /// Persists a status change under the writer lock.
    async fn apply(&self, mut task: Task, target: TaskStatus) -> BoardResult<Task> {
        let _writer = self.writer.lock().await;
        let base = task.version();
        task.transition_to(target, &*self.clock);
        match self.repository.update(&task, base).await {
            Ok(()) => {
                tracing::debug!("task {} moved to {}", task.code(), target);
                Ok(task)
            }
            Err(err) => {
                tracing::warn!("failed to persist transition of {}: {err}", task.code());
                Err(err.into())
            }
        }
    }

    /// Validates a dependency edge set against the current board.
    fn validate_dependencies(
        &self,
        board: &[Task],
        code: &TaskCode,
        dependencies: &BTreeSet<TaskCode>,
    ) -> BoardResult<()> {
        if self.guard.dangling_policy() == DanglingPolicy::Strict {
            let index = TaskIndex::from_tasks(board);
            for dependency in dependencies {
                if dependency != code && index.get(dependency).is_none() {
                    return Err(BoardError::UnknownDependency(dependency.clone()));
                }
            }
        }
        DependencyGraph::from_tasks(board).validate_edges(code, dependencies)?;
        Ok(())
    }
}

/// Allocates the next team-prefixed code on the given board.
fn next_code(board: &[Task], team: Team) -> TaskCode {
    let next = board
        .iter()
        .filter(|task| task.team() == team)
        .map(|task| task.code().sequence().get())
        .max()
        .unwrap_or(0)
        .saturating_add(1);
    TaskCode::for_team(team, NonZeroU64::new(next).unwrap_or(NonZeroU64::MIN))
}

fn find_in_board(board: &[Task], code: &TaskCode) -> Result<Task, TaskRepositoryError> {
    board
        .iter()
        .find(|task| task.code() == code)
        .cloned()
        .ok_or_else(|| TaskRepositoryError::NotFound(code.clone()))
}
