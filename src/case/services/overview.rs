//! Use-case overview service.

use crate::case::{
    domain::{Case, CaseDomainError, CaseId},
    ports::{CaseRepository, CaseRepositoryError},
};
use crate::task::domain::TaskStatus;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Partial update applied to an existing use-case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseEdit {
    name: Option<String>,
    description: Option<String>,
}

impl CaseEdit {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the use-case.
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
}

/// Completion summary of a use-case's tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaseProgress {
    closed: usize,
    total: usize,
}

impl CaseProgress {
    /// Summarises the statuses of the tasks grouped under a use-case.
    #[must_use]
    pub fn from_statuses(statuses: impl IntoIterator<Item = TaskStatus>) -> Self {
        let mut progress = Self::default();
        for status in statuses {
            progress.total = progress.total.saturating_add(1);
            if status.is_resolved() {
                progress.closed = progress.closed.saturating_add(1);
            }
        }
        progress
    }

    /// Returns the number of closed tasks.
    #[must_use]
    pub const fn closed(&self) -> usize {
        self.closed
    }

    /// Returns the total number of tasks.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Returns the completion percentage, rounded to the nearest integer.
    ///
    /// A use-case without tasks reports zero.
    #[must_use]
    #[expect(
        clippy::integer_division,
        clippy::integer_division_remainder_used,
        reason = "rounded percentage over a non-zero total"
    )]
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let scaled = self
            .closed
            .saturating_mul(100)
            .saturating_add(self.total / 2)
            / self.total;
        u8::try_from(scaled).unwrap_or(100)
    }
}

/// Service-level errors for use-case operations.
#[derive(Debug, Error)]
pub enum CaseOverviewError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] CaseDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] CaseRepositoryError),
}

/// Result type for use-case service operations.
pub type CaseOverviewResult<T> = Result<T, CaseOverviewError>;

/// Use-case lifecycle and overview service.
#[derive(Clone)]
pub struct CaseOverviewService<R, C>
where
    R: CaseRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> CaseOverviewService<R, C>
where
    R: CaseRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new use-case service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a new use-case.
    ///
    /// # Errors
    ///
    /// Returns [`CaseOverviewError`] when the name is invalid or
    /// persistence fails.
    pub async fn create_case(
        &self,
        name: impl Into<String> + Send,
        description: impl Into<String> + Send,
    ) -> CaseOverviewResult<Case> {
        let case = Case::new(name, description, &*self.clock)?;
        self.repository.store(&case).await?;
        tracing::debug!("created use-case {} ({})", case.id(), case.name());
        Ok(case)
    }

    /// Applies a partial edit to an existing use-case.
    ///
    /// # Errors
    ///
    /// Returns [`CaseOverviewError::Repository`] with
    /// [`CaseRepositoryError::NotFound`] when the use-case does not exist.
    pub async fn edit_case(&self, id: CaseId, edit: CaseEdit) -> CaseOverviewResult<Case> {
        let mut case = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(CaseRepositoryError::NotFound(id))?;
        let base = case.version();

        if let Some(name) = edit.name {
            case.rename(name, &*self.clock)?;
        }
        if let Some(description) = edit.description {
            case.describe(description, &*self.clock);
        }

        self.repository.update(&case, base).await?;
        Ok(case)
    }

    /// Deletes a use-case by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CaseOverviewError::Repository`] with
    /// [`CaseRepositoryError::NotFound`] when the use-case does not exist.
    pub async fn delete_case(&self, id: CaseId) -> CaseOverviewResult<()> {
        self.repository.delete_by_id(id).await?;
        tracing::debug!("deleted use-case {id}");
        Ok(())
    }

    /// Finds a use-case by identifier.
    ///
    /// Returns `Ok(None)` when the use-case does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`CaseOverviewError::Repository`] when the lookup fails.
    pub async fn get_case(&self, id: CaseId) -> CaseOverviewResult<Option<Case>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns all use-cases.
    ///
    /// # Errors
    ///
    /// Returns [`CaseOverviewError::Repository`] when the listing fails.
    pub async fn list_cases(&self) -> CaseOverviewResult<Vec<Case>> {
        Ok(self.repository.list_all().await?)
    }
}
