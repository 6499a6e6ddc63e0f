//! Per-test schema set-up for `PostgreSQL` integration tests.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use mockable::DefaultClock;
use taskboard::project::domain::{Project, ProjectDescription, ProjectName};
use taskboard::store::postgres::{
    PostgresProjectRepository, PostgresTaskRepository, apply_schema,
};
use taskboard::task::domain::{Deadline, Task, TaskDraft, TaskLimits, TaskTitle};
use uuid::Uuid;

/// Environment variable naming the test server.
pub const TEST_DATABASE_URL_ENV: &str = "TASKBOARD_TEST_DATABASE_URL";

/// Boxed error type for fallible set-up.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Points every pooled connection at one schema.
#[derive(Debug)]
struct SearchPath(String);

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for SearchPath {
    fn on_acquire(&self, conn: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!("SET search_path TO {}", self.0))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Repositories bound to a private schema, dropped with the context.
pub struct PreparedStore {
    url: String,
    schema: String,
    /// Project adapter.
    pub projects: PostgresProjectRepository,
    /// Task adapter.
    pub tasks: PostgresTaskRepository,
}

impl Drop for PreparedStore {
    fn drop(&mut self) {
        if let Ok(mut conn) = PgConnection::establish(&self.url) {
            drop(conn.batch_execute(&format!(
                "DROP SCHEMA IF EXISTS {} CASCADE",
                self.schema
            )));
        }
    }
}

/// Creates a private schema and applies the store schema to it.
///
/// # Panics
///
/// Panics when no test server is configured or it cannot be prepared, so an
/// ignored test run without a server fails instead of passing silently.
pub async fn prepared_store() -> PreparedStore {
    let url = std::env::var(TEST_DATABASE_URL_ENV)
        .unwrap_or_else(|_| panic!("{TEST_DATABASE_URL_ENV} must name a PostgreSQL server"));
    prepare(url).await.expect("test schema set-up")
}

async fn prepare(url: String) -> Result<PreparedStore, BoxError> {
    let schema = format!("taskboard_test_{}", Uuid::new_v4().simple());
    let mut admin = PgConnection::establish(&url)?;
    admin.batch_execute(&format!("CREATE SCHEMA {schema}"))?;

    let pool = Pool::builder()
        .max_size(2)
        .connection_customizer(Box::new(SearchPath(schema.clone())))
        .build(ConnectionManager::<PgConnection>::new(url.as_str()))?;
    apply_schema(&pool).await?;

    Ok(PreparedStore {
        projects: PostgresProjectRepository::new(pool.clone()),
        tasks: PostgresTaskRepository::new(pool),
        schema,
        url,
    })
}

/// Builds a project without persisting it.
#[must_use]
pub fn project(name: &str) -> Project {
    Project::new(
        ProjectName::new(name).expect("valid name"),
        ProjectDescription::default(),
        &DefaultClock,
    )
}

/// Builds a task owned by `owner` without persisting it.
#[must_use]
pub fn task(owner: &Project, title: &str, deadline: Option<&str>) -> Task {
    let mut draft = TaskDraft::new(TaskTitle::new(title).expect("valid title"));
    if let Some(day) = deadline {
        draft = draft.with_deadline(Deadline::parse(day).expect("valid deadline"));
    }
    owner
        .add_task(draft, 0, &TaskLimits::default(), &DefaultClock)
        .expect("task under the cap")
}
