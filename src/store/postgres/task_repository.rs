//! `PostgreSQL` repository implementation for tasks.

use super::{
    StorePgPool,
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::{projects, tasks},
};
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{
        Deadline, PersistedTaskData, Task, TaskDescription, TaskId, TaskStatus, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: StorePgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a connection pool.
    #[must_use]
    pub const fn new(pool: StorePgPool) -> Self {
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
        let task_id = task.id();
        let project_id = task.project_id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| map_insert_error(err, task_id, project_id))?;
            Ok(())
        })
        .await
    }

    async fn store_within_limit(
        &self,
        task: &Task,
        max_per_project: usize,
    ) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let project_id = task.project_id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx_conn| {
                // Locking the owner row serialises inserts into the same project.
                let owner = projects::table
                    .find(project_id.into_inner())
                    .select(projects::id)
                    .for_update()
                    .first::<Uuid>(tx_conn)
                    .optional()?;
                if owner.is_none() {
                    return Err(TaskRepositoryError::ProjectNotFound(project_id));
                }

                let total = tasks::table
                    .filter(tasks::project_id.eq(project_id.into_inner()))
                    .count()
                    .get_result::<i64>(tx_conn)?;
                let current = usize::try_from(total).map_err(TaskRepositoryError::persistence)?;
                if current >= max_per_project {
                    return Err(TaskRepositoryError::LimitReached {
                        project_id,
                        max: max_per_project,
                    });
                }

                diesel::insert_into(tasks::table)
                    .values(&new_row)
                    .execute(tx_conn)
                    .map_err(|err| map_insert_error(err, task_id, project_id))?;
                Ok(())
            })
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = TaskChangeset {
            title: task.title().as_str().to_owned(),
            description: task.description().as_str().to_owned(),
            status: task.status().as_str().to_owned(),
            deadline: task.deadline().map(Deadline::date),
            updated_at: task.updated_at(),
        };

        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.find(task_id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn count_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            let total = tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .count()
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            usize::try_from(total).map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn close_if_overdue(
        &self,
        id: TaskId,
        today: NaiveDate,
        closed_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let closed = diesel::update(
                tasks::table
                    .find(id.into_inner())
                    .filter(tasks::status.ne(TaskStatus::Done.as_str()))
                    .filter(tasks::deadline.lt(today)),
            )
            .set((
                tasks::status.eq(TaskStatus::Done.as_str()),
                tasks::updated_at.eq(closed_at),
            ))
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
            Ok(closed > 0)
        })
        .await
    }

    async fn list_overdue(&self, today: NaiveDate) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::deadline.is_not_null())
                .filter(tasks::deadline.lt(today))
                .filter(tasks::status.ne(TaskStatus::Done.as_str()))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

/// Maps a failed task insert onto repository errors.
pub(super) fn map_insert_error(
    err: DieselError,
    task_id: TaskId,
    project_id: ProjectId,
) -> TaskRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            TaskRepositoryError::DuplicateTask(task_id)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            TaskRepositoryError::ProjectNotFound(project_id)
        }
        _ => TaskRepositoryError::persistence(err),
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        project_id: task.project_id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        deadline: task.deadline().map(Deadline::date),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        project_id,
        title,
        description,
        status,
        deadline,
        created_at,
        updated_at,
    } = row;

    let task_title = TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?;
    let task_description =
        TaskDescription::new(description).map_err(TaskRepositoryError::persistence)?;
    let task_status =
        TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        project_id: ProjectId::from_uuid(project_id),
        title: task_title,
        description: task_description,
        status: task_status,
        deadline: deadline.map(Deadline::from_date),
        created_at,
        updated_at,
    }))
}
