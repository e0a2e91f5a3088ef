//! Error types for task domain validation and parsing.

use super::TaskCode;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// The dependency set contains the task's own code.
    #[error("task {0} cannot depend on itself")]
    SelfDependency(TaskCode),
}

/// Error returned while parsing task statuses from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing team codes from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown team code: {0}")]
pub struct ParseTeamError(pub String);

/// Error returned while parsing task codes.
///
/// A valid task code is a team code followed by a hyphen and a positive
/// sequence number, for example `DEV-1`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid task code '{0}', expected TEAM-N")]
pub struct ParseTaskCodeError(pub String);
