//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Human-readable task code.
    pub code: String,
    /// Team code.
    pub team: String,
    /// Optional use-case assignment.
    pub case_id: Option<uuid::Uuid>,
    /// Task name.
    pub name: String,
    /// Task description.
    pub description: String,
    /// Dependency codes as a JSON array.
    pub dependencies: Value,
    /// Workflow status.
    pub status: String,
    /// Optimistic-concurrency version.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Human-readable task code.
    pub code: String,
    /// Team code.
    pub team: String,
    /// Optional use-case assignment.
    pub case_id: Option<uuid::Uuid>,
    /// Task name.
    pub name: String,
    /// Task description.
    pub description: String,
    /// Dependency codes as a JSON array.
    pub dependencies: Value,
    /// Workflow status.
    pub status: String,
    /// Optimistic-concurrency version.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Update model applied by version-checked writes.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// Optional use-case assignment.
    pub case_id: Option<Option<uuid::Uuid>>,
    /// Task name.
    pub name: String,
    /// Task description.
    pub description: String,
    /// Dependency codes as a JSON array.
    pub dependencies: Value,
    /// Workflow status.
    pub status: String,
    /// Optimistic-concurrency version.
    pub version: i64,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
