//! `PostgreSQL` repository implementation for projects.

use super::{
    StorePgPool,
    models::{NewProjectRow, ProjectChangeset, ProjectRow},
    schema::projects,
};
use crate::project::{
    domain::{
        DescriptionPolicy, PersistedProjectData, Project, ProjectDescription, ProjectId,
        ProjectName,
    },
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Name of the unique constraint on `projects.name`.
const NAME_UNIQUE_CONSTRAINT: &str = "projects_name_unique";

/// Table lock taken before a capped insert. It conflicts with itself but not
/// with plain reads.
const LOCK_PROJECTS_SQL: &str = "LOCK TABLE projects IN SHARE ROW EXCLUSIVE MODE";

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: StorePgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a connection pool.
    #[must_use]
    pub const fn new(pool: StorePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProjectRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProjectRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProjectRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProjectRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let name = project.name().clone();
        let new_row = to_new_row(project);

        self.run_blocking(move |connection| {
            diesel::insert_into(projects::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| map_insert_error(err, project_id, &name))?;
            Ok(())
        })
        .await
    }

    async fn store_within_limit(
        &self,
        project: &Project,
        max_projects: usize,
    ) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let name = project.name().clone();
        let new_row = to_new_row(project);

        self.run_blocking(move |connection| {
            connection.transaction::<_, ProjectRepositoryError, _>(|tx_conn| {
                // Serialises capped inserts without blocking readers.
                diesel::sql_query(LOCK_PROJECTS_SQL).execute(tx_conn)?;
                let total = projects::table.count().get_result::<i64>(tx_conn)?;
                let current = usize::try_from(total).map_err(ProjectRepositoryError::persistence)?;
                if current >= max_projects {
                    return Err(ProjectRepositoryError::LimitReached { max: max_projects });
                }
                diesel::insert_into(projects::table)
                    .values(&new_row)
                    .execute(tx_conn)
                    .map_err(|err| map_insert_error(err, project_id, &name))?;
                Ok(())
            })
        })
        .await
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let name = project.name().clone();
        let changeset = ProjectChangeset {
            name: project.name().as_str().to_owned(),
            description: project.description().as_str().to_owned(),
            updated_at: project.updated_at(),
        };

        self.run_blocking(move |connection| {
            let updated = diesel::update(projects::table.find(project_id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(|err| map_update_error(err, &name))?;
            if updated == 0 {
                return Err(ProjectRepositoryError::NotFound(project_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(projects::table.find(id.into_inner()))
                .execute(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(ProjectRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .find(id.into_inner())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn find_by_name(&self, name: &ProjectName) -> ProjectRepositoryResult<Option<Project>> {
        let lookup_name = name.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::name.eq(lookup_name))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn list(&self) -> ProjectRepositoryResult<Vec<Project>> {
        self.run_blocking(|connection| {
            let rows = projects::table
                .order((projects::created_at.asc(), projects::id.asc()))
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }

    async fn count(&self) -> ProjectRepositoryResult<usize> {
        self.run_blocking(|connection| {
            let total = projects::table
                .count()
                .get_result::<i64>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            usize::try_from(total).map_err(ProjectRepositoryError::persistence)
        })
        .await
    }
}

fn to_new_row(project: &Project) -> NewProjectRow {
    NewProjectRow {
        id: project.id().into_inner(),
        name: project.name().as_str().to_owned(),
        description: project.description().as_str().to_owned(),
        created_at: project.created_at(),
        updated_at: project.updated_at(),
    }
}

/// Rebuilds a project from a row.
///
/// Stored descriptions are re-read under the ceiling-only policy so that
/// tightening the policy never hides existing projects.
pub(super) fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let ProjectRow {
        id,
        name,
        description,
        created_at,
        updated_at,
    } = row;

    let project_name = ProjectName::new(name).map_err(ProjectRepositoryError::persistence)?;
    let project_description = ProjectDescription::new(description, DescriptionPolicy::CeilingOnly)
        .map_err(ProjectRepositoryError::persistence)?;

    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(id),
        name: project_name,
        description: project_description,
        created_at,
        updated_at,
    }))
}

/// Maps a failed project insert onto repository errors.
pub(super) fn map_insert_error(
    err: DieselError,
    project_id: ProjectId,
    name: &ProjectName,
) -> ProjectRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if is_name_unique_violation(info.as_ref()) =>
        {
            ProjectRepositoryError::DuplicateName(name.clone())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            ProjectRepositoryError::DuplicateProject(project_id)
        }
        _ => ProjectRepositoryError::persistence(err),
    }
}

/// Maps a failed project update onto repository errors.
pub(super) fn map_update_error(err: DieselError, name: &ProjectName) -> ProjectRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if is_name_unique_violation(info.as_ref()) =>
        {
            ProjectRepositoryError::DuplicateName(name.clone())
        }
        _ => ProjectRepositoryError::persistence(err),
    }
}

fn is_name_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|constraint| constraint == NAME_UNIQUE_CONSTRAINT)
}
