//! `PostgreSQL` repository implementation for use-case persistence.

use super::{
    models::{CaseChangeset, CaseRow, NewCaseRow},
    schema::cases,
};
use crate::case::{
    domain::{Case, CaseId, PersistedCaseData},
    ports::{CaseRepository, CaseRepositoryError, CaseRepositoryResult},
};
use crate::task::adapters::postgres::BoardPgPool;
use crate::task::domain::Version;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed use-case repository.
#[derive(Debug, Clone)]
pub struct PostgresCaseRepository {
    pool: BoardPgPool,
}

impl PostgresCaseRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CaseRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CaseRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CaseRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CaseRepositoryError::persistence)?
    }
}

#[async_trait]
impl CaseRepository for PostgresCaseRepository {
    async fn store(&self, case: &Case) -> CaseRepositoryResult<()> {
        let id = case.id();
        let new_row = to_new_row(case)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(cases::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        CaseRepositoryError::DuplicateCase(id)
                    }
                    _ => CaseRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, case: &Case, base: Version) -> CaseRepositoryResult<()> {
        let id = case.id();
        let base_version = version_to_row(base)?;
        let changeset = to_changeset(case)?;

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                cases::table
                    .filter(cases::id.eq(id.into_inner()))
                    .filter(cases::version.eq(base_version)),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(CaseRepositoryError::persistence)?;

            if affected > 0 {
                return Ok(());
            }

            let found = find_row_by_id(connection, id)?
                .ok_or(CaseRepositoryError::NotFound(id))?;
            Err(CaseRepositoryError::StaleVersion {
                id,
                base,
                found: version_from_row(found.version)?,
            })
        })
        .await
    }

    async fn find_by_id(&self, id: CaseId) -> CaseRepositoryResult<Option<Case>> {
        self.run_blocking(move |connection| {
            let row = find_row_by_id(connection, id)?;
            row.map(row_to_case).transpose()
        })
        .await
    }

    async fn list_all(&self) -> CaseRepositoryResult<Vec<Case>> {
        self.run_blocking(|connection| {
            let rows = cases::table
                .order(cases::created_at.asc())
                .select(CaseRow::as_select())
                .load::<CaseRow>(connection)
                .map_err(CaseRepositoryError::persistence)?;
            rows.into_iter().map(row_to_case).collect()
        })
        .await
    }

    async fn delete_by_id(&self, id: CaseId) -> CaseRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(cases::table.filter(cases::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(CaseRepositoryError::persistence)?;
            if affected == 0 {
                return Err(CaseRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn find_row_by_id(
    connection: &mut PgConnection,
    id: CaseId,
) -> CaseRepositoryResult<Option<CaseRow>> {
    cases::table
        .filter(cases::id.eq(id.into_inner()))
        .select(CaseRow::as_select())
        .first::<CaseRow>(connection)
        .optional()
        .map_err(CaseRepositoryError::persistence)
}

fn version_to_row(version: Version) -> CaseRepositoryResult<i64> {
    i64::try_from(version.get()).map_err(CaseRepositoryError::persistence)
}

fn version_from_row(value: i64) -> CaseRepositoryResult<Version> {
    let raw = u64::try_from(value).map_err(CaseRepositoryError::persistence)?;
    Ok(Version::from_persisted(raw))
}

fn to_new_row(case: &Case) -> CaseRepositoryResult<NewCaseRow> {
    Ok(NewCaseRow {
        id: case.id().into_inner(),
        name: case.name().to_owned(),
        description: case.description().to_owned(),
        version: version_to_row(case.version())?,
        created_at: case.created_at(),
        updated_at: case.updated_at(),
    })
}

fn to_changeset(case: &Case) -> CaseRepositoryResult<CaseChangeset> {
    Ok(CaseChangeset {
        name: case.name().to_owned(),
        description: case.description().to_owned(),
        version: version_to_row(case.version())?,
        updated_at: case.updated_at(),
    })
}

fn row_to_case(row: CaseRow) -> CaseRepositoryResult<Case> {
    let data = PersistedCaseData {
        id: CaseId::from_uuid(row.id),
        name: row.name,
        description: row.description,
        version: version_from_row(row.version)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(Case::from_persisted(data))
}
