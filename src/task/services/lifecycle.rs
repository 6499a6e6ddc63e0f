//! Service layer for adding, editing, listing and deleting tasks.

use crate::error::ErrorKind;
use crate::project::{
    domain::{Project, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::{
        Deadline, ParseTaskStatusError, Task, TaskChanges, TaskDescription, TaskDomainError,
        TaskDraft, TaskId, TaskLimits, TaskStatus, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for adding a task to a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    title: String,
    description: Option<String>,
    deadline: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required project and title.
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: None,
            deadline: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the deadline as a `YYYY-MM-DD` string.
    #[must_use]
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }
}

/// Request payload for a partial task update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    task_id: TaskId,
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    deadline: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates an update that changes nothing yet.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            title: None,
            description: None,
            status: None,
            deadline: None,
        }
    }

    /// Sets the new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the new status (`todo`, `doing` or `done`).
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the new deadline as a `YYYY-MM-DD` string.
    #[must_use]
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The requested status is not one of the known values.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
    /// Project lookup failed.
    #[error(transparent)]
    Project(#[from] ProjectRepositoryError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskLifecycleError {
    /// Classifies the error for boundary adapters.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::InvalidStatus(_) => ErrorKind::Validation,
            Self::Project(err) => err.kind(),
            Self::Repository(err) => err.kind(),
        }
    }
}

/// Result type for task service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
pub struct TaskLifecycleService<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    clock: Arc<C>,
    limits: TaskLimits,
}

impl<T, P, C> Clone for TaskLifecycleService<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            projects: Arc::clone(&self.projects),
            clock: Arc::clone(&self.clock),
            limits: self.limits,
        }
    }
}

impl<T, P, C> TaskLifecycleService<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, projects: Arc<P>, clock: Arc<C>, limits: TaskLimits) -> Self {
        Self {
            tasks,
            projects,
            clock,
            limits,
        }
    }

    /// Returns the limits this service enforces.
    #[must_use]
    pub const fn limits(&self) -> &TaskLimits {
        &self.limits
    }

    /// Adds a task to a project.
    ///
    /// The per-project cap is checked against the count held in storage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Project`] when the project is missing
    /// and [`TaskLifecycleError::Domain`] when a field is invalid or the
    /// project is at capacity. Capacity is checked again by the repository
    /// while storing.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let CreateTaskRequest {
            project_id,
            title,
            description,
            deadline,
        } = request;

        let project = self.find_project(project_id).await?;

        let mut draft = TaskDraft::new(TaskTitle::new(title)?)
            .with_description(TaskDescription::new(description.unwrap_or_default())?);
        if let Some(raw_deadline) = deadline {
            draft = draft.with_deadline(Deadline::parse(&raw_deadline)?);
        }

        let current = self.tasks.count_by_project(project_id).await?;
        let task = project.add_task(draft, current, &self.limits, &*self.clock)?;
        self.tasks
            .store_within_limit(&task, self.limits.max_tasks_per_project)
            .await
            .map_err(|err| match err {
                TaskRepositoryError::LimitReached {
                    project_id: full_project,
                    max,
                } => {
                    TaskLifecycleError::Domain(TaskDomainError::TaskLimitReached {
                        project: full_project,
                        max,
                    })
                }
                other => TaskLifecycleError::Repository(other),
            })?;
        tracing::info!(task_id = %task.id(), %project_id, "task created");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) when the task does
    /// not exist.
    pub async fn get(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.find_task(task_id).await
    }

    /// Lists the tasks of a project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Project`] when the project does not
    /// exist.
    pub async fn list(&self, project_id: ProjectId) -> TaskLifecycleResult<Vec<Task>> {
        self.find_project(project_id).await?;
        Ok(self.tasks.list_by_project(project_id).await?)
    }

    /// Applies a partial update; each provided field is validated as on
    /// creation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the task is missing or a provided
    /// field is invalid.
    pub async fn update(&self, request: UpdateTaskRequest) -> TaskLifecycleResult<Task> {
        let UpdateTaskRequest {
            task_id,
            title,
            description,
            status,
            deadline,
        } = request;

        let changes = TaskChanges {
            title: title.map(TaskTitle::new).transpose()?,
            description: description.map(TaskDescription::new).transpose()?,
            status: status.as_deref().map(str::parse::<TaskStatus>).transpose()?,
            deadline: deadline.as_deref().map(Deadline::parse).transpose()?,
        };

        let mut task = self.find_task(task_id).await?;
        task.apply(changes, &*self.clock);
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Sets a task's status. Repeating the current status succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidStatus`] for unknown statuses and
    /// a wrapped [`TaskRepositoryError::NotFound`] when the task is missing.
    pub async fn update_status(&self, task_id: TaskId, status: &str) -> TaskLifecycleResult<Task> {
        let new_status = TaskStatus::try_from(status)?;
        let mut task = self.find_task(task_id).await?;
        task.set_status(new_status, &*self.clock);
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns a wrapped [`TaskRepositoryError::NotFound`] when the task does
    /// not exist.
    pub async fn delete(&self, task_id: TaskId) -> TaskLifecycleResult<()> {
        self.tasks.delete(task_id).await?;
        tracing::info!(%task_id, "task deleted");
        Ok(())
    }

    async fn find_project(&self, project_id: ProjectId) -> TaskLifecycleResult<Project> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| ProjectRepositoryError::NotFound(project_id).into())
    }

    async fn find_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| TaskRepositoryError::NotFound(task_id).into())
    }
}
