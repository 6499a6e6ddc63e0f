//! `PostgreSQL` adapters for project and task persistence.
//!
//! Diesel calls are synchronous, so every repository operation checks out a
//! pooled connection inside `spawn_blocking`. Project deletion cascades to
//! tasks through the `tasks.project_id` foreign key.

mod models;
mod project_repository;
mod schema;
mod task_repository;

#[cfg(test)]
mod tests;

pub use project_repository::PostgresProjectRepository;
pub use task_repository::PostgresTaskRepository;

use crate::project::ports::ProjectRepositoryError;
use crate::task::ports::TaskRepositoryError;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool type shared by the store adapters.
pub type StorePgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema applied at start-up. Every statement is idempotent.
pub const SCHEMA_SQL: &str =
    include_str!("../../../migrations/2026-01-10-000000_create_projects_and_tasks/up.sql");

/// Errors raised while preparing the database.
#[derive(Debug, Error)]
pub enum StoreSetupError {
    /// The connection pool could not be built or a connection checked out.
    #[error("failed to obtain a database connection: {0}")]
    Pool(#[from] PoolError),
    /// Applying the schema failed.
    #[error("failed to apply schema: {0}")]
    Schema(#[from] diesel::result::Error),
    /// The blocking schema task panicked or was cancelled.
    #[error("schema task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`StoreSetupError::Pool`] when the pool cannot open its initial
/// connections.
pub fn connect(database_url: &str, max_size: u32) -> Result<StorePgPool, StoreSetupError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Ok(Pool::builder().max_size(max_size).build(manager)?)
}

/// Creates the `projects` and `tasks` tables when they are missing.
///
/// # Errors
///
/// Returns [`StoreSetupError`] when no connection is available or a schema
/// statement fails.
pub async fn apply_schema(pool: &StorePgPool) -> Result<(), StoreSetupError> {
    let schema_pool = pool.clone();
    tokio::task::spawn_blocking(move || -> Result<(), StoreSetupError> {
        let mut connection = schema_pool.get()?;
        connection.batch_execute(SCHEMA_SQL)?;
        Ok(())
    })
    .await?
}

impl From<diesel::result::Error> for ProjectRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}

impl From<diesel::result::Error> for TaskRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}
