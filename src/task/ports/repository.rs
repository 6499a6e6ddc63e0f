//! Repository port for task persistence and lookup.

use crate::error::ErrorKind;
use crate::project::domain::ProjectId;
use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task under its owning project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists or [`TaskRepositoryError::ProjectNotFound`] when the owning
    /// project has been deleted.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Stores a new task unless its project already owns `max_per_project`
    /// tasks. The count and the insert happen atomically, so concurrent
    /// creations cannot overshoot the cap.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::LimitReached`] when the project is full,
    /// otherwise the errors of [`TaskRepository::store`].
    async fn store_within_limit(
        &self,
        task: &Task,
        max_per_project: usize,
    ) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Deletes a task and removes it from its project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the tasks of a project in creation order.
    async fn list_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the number of tasks a project owns.
    async fn count_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize>;

    /// Returns every task whose deadline lies before `today` and whose status
    /// is not done.
    async fn list_overdue(&self, today: NaiveDate) -> TaskRepositoryResult<Vec<Task>>;

    /// Sets the task to done, stamped `closed_at`, only if it is still
    /// overdue on `today`. No other field is written.
    ///
    /// Returns `false` when the task no longer exists or is no longer
    /// overdue.
    async fn close_if_overdue(
        &self,
        id: TaskId,
        today: NaiveDate,
        closed_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<bool>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The owning project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The owning project was full while storing.
    #[error("project {project_id} already has the maximum of {max} tasks")]
    LimitReached {
        /// Owning project.
        project_id: ProjectId,
        /// Configured cap.
        max: usize,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the error for boundary adapters.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) | Self::ProjectNotFound(_) => ErrorKind::NotFound,
            Self::LimitReached { .. } => ErrorKind::LimitExceeded,
            Self::DuplicateTask(_) | Self::Persistence(_) => ErrorKind::Persistence,
        }
    }
}
