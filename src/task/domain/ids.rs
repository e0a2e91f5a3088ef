//! Identifier and validated scalar types for the task domain.

use super::{ParseTaskCodeError, Team};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use uuid::Uuid;

/// Unique identifier for an internal task record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new random task identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a task identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Optimistic-concurrency token carried by every mutable aggregate.
///
/// Versions start at one and increase by one per mutation; a write whose
/// base version no longer matches the persisted version is rejected as
/// stale rather than silently overwriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// The version assigned to a freshly created aggregate.
    pub const INITIAL: Self = Self(1);

    /// Reconstructs a version from its persisted numeric value.
    #[must_use]
    pub const fn from_persisted(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the successor version.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Human-readable, team-prefixed task code such as `DEV-1`.
///
/// Task codes are the identity dependency references are expressed in:
/// a dependency edge stores the prerequisite's code, never the task record
/// itself, so edges stay weak references resolved through an index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskCode {
    team: Team,
    sequence: NonZeroU64,
}

impl TaskCode {
    /// Creates the code for the given team and sequence number.
    #[must_use]
    pub const fn for_team(team: Team, sequence: NonZeroU64) -> Self {
        Self { team, sequence }
    }

    /// Returns the team the code is prefixed with.
    #[must_use]
    pub const fn team(&self) -> Team {
        self.team
    }

    /// Returns the per-team sequence number.
    #[must_use]
    pub const fn sequence(&self) -> NonZeroU64 {
        self.sequence
    }
}

impl TryFrom<&str> for TaskCode {
    type Error = ParseTaskCodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        let invalid = || ParseTaskCodeError(value.to_owned());
        let (prefix, digits) = trimmed.split_once('-').ok_or_else(invalid)?;
        let team = Team::try_from(prefix).map_err(|_| invalid())?;
        let sequence: NonZeroU64 = digits.parse().map_err(|_| invalid())?;
        Ok(Self::for_team(team, sequence))
    }
}

impl TryFrom<String> for TaskCode {
    type Error = ParseTaskCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<TaskCode> for String {
    fn from(code: TaskCode) -> Self {
        code.to_string()
    }
}

impl fmt::Display for TaskCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.team.code(), self.sequence)
    }
}
