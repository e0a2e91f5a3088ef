//! Diesel row models for use-case persistence.

use super::schema::cases;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for use-case records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cases)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CaseRow {
    /// Use-case identifier.
    pub id: uuid::Uuid,
    /// Use-case name.
    pub name: String,
    /// Use-case description.
    pub description: String,
    /// Optimistic-concurrency version.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for use-case records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cases)]
pub struct NewCaseRow {
    /// Use-case identifier.
    pub id: uuid::Uuid,
    /// Use-case name.
    pub name: String,
    /// Use-case description.
    pub description: String,
    /// Optimistic-concurrency version.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Update model applied by version-checked writes.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = cases)]
pub struct CaseChangeset {
    /// Use-case name.
    pub name: String,
    /// Use-case description.
    pub description: String,
    /// Optimistic-concurrency version.
    pub version: i64,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
