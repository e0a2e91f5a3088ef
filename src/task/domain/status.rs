//! Task status workflow enumeration.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow status of a task, one board column each.
///
/// All six directed transitions between the three statuses are permitted;
/// `Closed` is not terminal and a closed task may be reopened. The
/// [`TransitionGuard`](super::TransitionGuard) only adds a confirmation
/// checkpoint on transitions into `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Task is in the backlog; the status every task is created with.
    Open,
    /// Task is being worked on.
    InProgress,
    /// Task work is finished.
    Closed,
}

impl TaskStatus {
    /// All statuses, in board column order.
    pub const ALL: [Self; 3] = [Self::Open, Self::InProgress, Self::Closed];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Closed => "CLOSED",
        }
    }

    /// Returns `true` when the status counts as resolved for dependency
    /// checks, which only `Closed` does.
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "OPEN" => Ok(Self::Open),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
