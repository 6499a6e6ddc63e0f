//! Request and response bodies for the JSON API.

use crate::error::ErrorKind;
use crate::project::domain::Project;
use crate::task::domain::{Deadline, Task, TaskStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /api/v1/projects/`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateProjectBody {
    /// Project name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `PUT /api/v1/projects/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateProjectBody {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Project as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProjectBody {
    /// Identifier.
    pub id: Uuid,
    /// Unique name.
    pub name: String,
    /// Description, possibly empty.
    pub description: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl From<&Project> for ProjectBody {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id().into_inner(),
            name: project.name().as_str().to_owned(),
            description: project.description().as_str().to_owned(),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        }
    }
}

/// Body of `POST /api/v1/tasks/project/{project_id}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateTaskBody {
    /// Task title.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional `YYYY-MM-DD` deadline.
    #[serde(default)]
    pub deadline: Option<String>,
}

/// Body of `PUT /api/v1/tasks/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateTaskBody {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New status.
    #[serde(default)]
    pub status: Option<String>,
    /// New `YYYY-MM-DD` deadline.
    #[serde(default)]
    pub deadline: Option<String>,
}

/// Body of `PATCH /api/v1/tasks/{id}/status`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatusBody {
    /// Requested status.
    pub status: String,
}

/// Task as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TaskBody {
    /// Identifier.
    pub id: Uuid,
    /// Owning project.
    pub project_id: Uuid,
    /// Title.
    pub title: String,
    /// Description, possibly empty.
    pub description: String,
    /// Current status.
    pub status: TaskStatus,
    /// Deadline, if any.
    pub deadline: Option<NaiveDate>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskBody {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().into_inner(),
            project_id: task.project_id().into_inner(),
            title: task.title().as_str().to_owned(),
            description: task.description().as_str().to_owned(),
            status: task.status(),
            deadline: task.deadline().map(Deadline::date),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// Confirmation returned by delete routes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DetailBody {
    /// Human-readable outcome.
    pub detail: String,
}

/// Error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// Failure category.
    pub error: ErrorKind,
    /// Human-readable message.
    pub detail: String,
}
