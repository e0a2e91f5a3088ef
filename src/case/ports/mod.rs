//! Port contracts for use-case management.

pub mod repository;

pub use repository::{CaseRepository, CaseRepositoryError, CaseRepositoryResult};
