//! Repository port for use-case persistence and lookup.

use crate::case::domain::{Case, CaseId};
use crate::task::domain::Version;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for use-case repository operations.
pub type CaseRepositoryResult<T> = Result<T, CaseRepositoryError>;

/// Use-case persistence contract.
#[async_trait]
pub trait CaseRepository: Send + Sync {
    /// Stores a new use-case.
    ///
    /// # Errors
    ///
    /// Returns [`CaseRepositoryError::DuplicateCase`] when the identifier
    /// already exists.
    async fn store(&self, case: &Case) -> CaseRepositoryResult<()>;

    /// Persists changes to an existing use-case.
    ///
    /// `base` is the version the caller read before mutating.
    ///
    /// # Errors
    ///
    /// Returns [`CaseRepositoryError::NotFound`] when the use-case does not
    /// exist and [`CaseRepositoryError::StaleVersion`] when the persisted
    /// version no longer matches `base`.
    async fn update(&self, case: &Case, base: Version) -> CaseRepositoryResult<()>;

    /// Finds a use-case by identifier.
    ///
    /// Returns `None` when the use-case does not exist.
    async fn find_by_id(&self, id: CaseId) -> CaseRepositoryResult<Option<Case>>;

    /// Returns all use-cases, ordered by creation time.
    async fn list_all(&self) -> CaseRepositoryResult<Vec<Case>>;

    /// Deletes a use-case by identifier.
    ///
    /// Task assignments pointing at the deleted use-case are not scrubbed
    /// here; that is the task collection's concern.
    ///
    /// # Errors
    ///
    /// Returns [`CaseRepositoryError::NotFound`] when the use-case does not
    /// exist.
    async fn delete_by_id(&self, id: CaseId) -> CaseRepositoryResult<()>;
}

/// Errors returned by use-case repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CaseRepositoryError {
    /// A use-case with the same identifier already exists.
    #[error("duplicate use-case identifier: {0}")]
    DuplicateCase(CaseId),

    /// The use-case was not found.
    #[error("use-case not found: {0}")]
    NotFound(CaseId),

    /// The write was based on an outdated read.
    #[error("stale write for use-case {id}: based on {base}, persisted is {found}")]
    StaleVersion {
        /// Identifier of the use-case the write targeted.
        id: CaseId,
        /// Version the caller's mutation was based on.
        base: Version,
        /// Version actually persisted at write time.
        found: Version,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CaseRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
