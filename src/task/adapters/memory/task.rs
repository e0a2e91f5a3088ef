//! In-memory task repository for tests and single-process use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::case::domain::CaseId;
use crate::task::{
    domain::{Task, TaskCode, Team, Version},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskCode, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Collects matching tasks in code order.
fn sorted_matches<F>(tasks: &HashMap<TaskCode, Task>, predicate: F) -> Vec<Task>
where
    F: Fn(&Task) -> bool,
{
    let mut matches: Vec<Task> = tasks.values().filter(|task| predicate(task)).cloned().collect();
    matches.sort_by(|a, b| a.code().cmp(b.code()));
    matches
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.contains_key(task.code()) {
            return Err(TaskRepositoryError::DuplicateCode(task.code().clone()));
        }
        state.insert(task.code().clone(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task, base: Version) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .get(task.code())
            .ok_or_else(|| TaskRepositoryError::NotFound(task.code().clone()))?;
        if stored.version() != base {
            return Err(TaskRepositoryError::StaleVersion {
                code: task.code().clone(),
                base,
                found: stored.version(),
            });
        }
        state.insert(task.code().clone(), task.clone());
        Ok(())
    }

    async fn find_by_code(&self, code: &TaskCode) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.get(code).cloned())
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(sorted_matches(&state, |_| true))
    }

    async fn list_by_team(&self, team: Team) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(sorted_matches(&state, |task| task.team() == team))
    }

    async fn list_by_case(&self, case: CaseId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(sorted_matches(&state, |task| task.case() == Some(case)))
    }

    async fn delete_by_code(&self, code: &TaskCode) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .remove(code)
            .map(|_| ())
            .ok_or_else(|| TaskRepositoryError::NotFound(code.clone()))
    }
}
