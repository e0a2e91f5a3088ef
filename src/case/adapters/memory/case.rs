//! In-memory use-case repository for tests and single-process use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::case::{
    domain::{Case, CaseId},
    ports::{CaseRepository, CaseRepositoryError, CaseRepositoryResult},
};
use crate::task::domain::Version;

/// Thread-safe in-memory use-case repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCaseRepository {
    state: Arc<RwLock<HashMap<CaseId, Case>>>,
}

impl InMemoryCaseRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> CaseRepositoryError {
    CaseRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CaseRepository for InMemoryCaseRepository {
    async fn store(&self, case: &Case) -> CaseRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.contains_key(&case.id()) {
            return Err(CaseRepositoryError::DuplicateCase(case.id()));
        }
        state.insert(case.id(), case.clone());
        Ok(())
    }

    async fn update(&self, case: &Case, base: Version) -> CaseRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .get(&case.id())
            .ok_or(CaseRepositoryError::NotFound(case.id()))?;
        if stored.version() != base {
            return Err(CaseRepositoryError::StaleVersion {
                id: case.id(),
                base,
                found: stored.version(),
            });
        }
        state.insert(case.id(), case.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: CaseId) -> CaseRepositoryResult<Option<Case>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.get(&id).cloned())
    }

    async fn list_all(&self) -> CaseRepositoryResult<Vec<Case>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut cases: Vec<Case> = state.values().cloned().collect();
        cases.sort_by_key(|case| (case.created_at(), case.id().into_inner()));
        Ok(cases)
    }

    async fn delete_by_id(&self, id: CaseId) -> CaseRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .remove(&id)
            .map(|_| ())
            .ok_or(CaseRepositoryError::NotFound(id))
    }
}
