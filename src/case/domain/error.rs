//! Error types for use-case domain validation.

use thiserror::Error;

/// Errors returned while constructing or mutating use-case values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CaseDomainError {
    /// The use-case name is empty after trimming.
    #[error("use-case name must not be empty")]
    EmptyCaseName,
}
