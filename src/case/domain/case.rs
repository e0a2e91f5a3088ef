//! Use-case aggregate root.

use super::{CaseDomainError, CaseId};
use crate::task::domain::Version;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A grouping entity tasks are assigned to, independent of the team and
/// status workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    id: CaseId,
    name: String,
    description: String,
    version: Version,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted use-case aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCaseData {
    /// Persisted use-case identifier.
    pub id: CaseId,
    /// Persisted use-case name.
    pub name: String,
    /// Persisted use-case description.
    pub description: String,
    /// Persisted concurrency version.
    pub version: Version,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Case {
    /// Creates a new use-case.
    ///
    /// # Errors
    ///
    /// Returns [`CaseDomainError::EmptyCaseName`] when the name is blank.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, CaseDomainError> {
        let case_name = validated_name(name.into())?;
        let timestamp = clock.utc();
        Ok(Self {
            id: CaseId::new(),
            name: case_name,
            description: description.into(),
            version: Version::INITIAL,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a use-case from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCaseData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            version: data.version,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the use-case identifier.
    #[must_use]
    pub const fn id(&self) -> CaseId {
        self.id
    }

    /// Returns the use-case name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the use-case description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the concurrency version of this in-memory view.
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Renames the use-case.
    ///
    /// # Errors
    ///
    /// Returns [`CaseDomainError::EmptyCaseName`] when the name is blank.
    pub fn rename(
        &mut self,
        name: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), CaseDomainError> {
        self.name = validated_name(name.into())?;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the use-case description.
    pub fn describe(&mut self, description: impl Into<String>, clock: &impl Clock) {
        self.description = description.into();
        self.touch(clock);
    }

    /// Updates the mutation timestamp and bumps the concurrency version.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
        self.version = self.version.next();
    }
}

/// Trims and validates a use-case name.
fn validated_name(raw: String) -> Result<String, CaseDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CaseDomainError::EmptyCaseName);
    }
    Ok(trimmed.to_owned())
}
