//! `PostgreSQL` repository implementation for task persistence.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::case::domain::CaseId;
use crate::task::{
    domain::{PersistedTaskData, Task, TaskCode, TaskStatus, Team, Version},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::BTreeSet;

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: BoardPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let code = task.code().clone();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateCode(code.clone())
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task, base: Version) -> TaskRepositoryResult<()> {
        let code = task.code().clone();
        let base_version = version_to_row(base)?;
        let changeset = to_changeset(task)?;

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                tasks::table
                    .filter(tasks::code.eq(code.to_string()))
                    .filter(tasks::version.eq(base_version)),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;

            if affected > 0 {
                return Ok(());
            }

            // Zero rows means either the task is gone or someone wrote a
            // newer version first; a follow-up read distinguishes the two.
            let found = find_row_by_code(connection, &code)?
                .ok_or_else(|| TaskRepositoryError::NotFound(code.clone()))?;
            Err(TaskRepositoryError::StaleVersion {
                code: code.clone(),
                base,
                found: version_from_row(found.version)?,
            })
        })
        .await
    }

    async fn find_by_code(&self, code: &TaskCode) -> TaskRepositoryResult<Option<Task>> {
        let lookup = code.clone();
        self.run_blocking(move |connection| {
            let row = find_row_by_code(connection, &lookup)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows_to_sorted_tasks(rows)
        })
        .await
    }

    async fn list_by_team(&self, team: Team) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::team.eq(team.code()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows_to_sorted_tasks(rows)
        })
        .await
    }

    async fn list_by_case(&self, case: CaseId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::case_id.eq(case.into_inner()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows_to_sorted_tasks(rows)
        })
        .await
    }

    async fn delete_by_code(&self, code: &TaskCode) -> TaskRepositoryResult<()> {
        let target = code.clone();
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.filter(tasks::code.eq(target.to_string())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(target.clone()));
            }
            Ok(())
        })
        .await
    }
}

fn find_row_by_code(
    connection: &mut PgConnection,
    code: &TaskCode,
) -> TaskRepositoryResult<Option<TaskRow>> {
    tasks::table
        .filter(tasks::code.eq(code.to_string()))
        .select(TaskRow::as_select())
        .first::<TaskRow>(connection)
        .optional()
        .map_err(TaskRepositoryError::persistence)
}

fn version_to_row(version: Version) -> TaskRepositoryResult<i64> {
    i64::try_from(version.get()).map_err(TaskRepositoryError::persistence)
}

fn version_from_row(value: i64) -> TaskRepositoryResult<Version> {
    let raw = u64::try_from(value).map_err(TaskRepositoryError::persistence)?;
    Ok(Version::from_persisted(raw))
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let dependencies =
        serde_json::to_value(task.dependencies()).map_err(TaskRepositoryError::persistence)?;

    Ok(NewTaskRow {
        id: task.id().into_inner(),
        code: task.code().to_string(),
        team: task.team().code().to_owned(),
        case_id: task.case().map(CaseId::into_inner),
        name: task.name().to_owned(),
        description: task.description().to_owned(),
        dependencies,
        status: task.status().as_str().to_owned(),
        version: version_to_row(task.version())?,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn to_changeset(task: &Task) -> TaskRepositoryResult<TaskChangeset> {
    let dependencies =
        serde_json::to_value(task.dependencies()).map_err(TaskRepositoryError::persistence)?;

    Ok(TaskChangeset {
        case_id: Some(task.case().map(CaseId::into_inner)),
        name: task.name().to_owned(),
        description: task.description().to_owned(),
        dependencies,
        status: task.status().as_str().to_owned(),
        version: version_to_row(task.version())?,
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        code: persisted_code,
        case_id,
        name,
        description,
        dependencies: persisted_dependencies,
        status: persisted_status,
        version: persisted_version,
        created_at,
        updated_at,
        ..
    } = row;

    let code =
        TaskCode::try_from(persisted_code.as_str()).map_err(TaskRepositoryError::persistence)?;
    let dependencies = serde_json::from_value::<BTreeSet<TaskCode>>(persisted_dependencies)
        .map_err(TaskRepositoryError::persistence)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: crate::task::domain::TaskId::from_uuid(id),
        code,
        case: case_id.map(CaseId::from_uuid),
        name,
        description,
        dependencies,
        status,
        version: version_from_row(persisted_version)?,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

/// Converts and sorts rows by task code.
///
/// Codes sort numerically by team and sequence, which a lexicographic SQL
/// `ORDER BY` on the text column would not preserve.
fn rows_to_sorted_tasks(rows: Vec<TaskRow>) -> TaskRepositoryResult<Vec<Task>> {
    let mut converted = rows
        .into_iter()
        .map(row_to_task)
        .collect::<TaskRepositoryResult<Vec<Task>>>()?;
    converted.sort_by(|a, b| a.code().cmp(b.code()));
    Ok(converted)
}
