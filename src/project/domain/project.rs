//! Project aggregate root.

use super::{ProjectDescription, ProjectId, ProjectName};
use crate::task::domain::{Task, TaskDomainError, TaskDraft, TaskLimits};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Project aggregate root.
///
/// Tasks are stored separately and reference their project by
/// [`ProjectId`]; the project is the only way to create one, through
/// [`Project::add_task`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    description: ProjectDescription,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted name.
    pub name: ProjectName,
    /// Persisted description.
    pub description: ProjectDescription,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project with a fresh identifier.
    #[must_use]
    pub fn new(name: ProjectName, description: ProjectDescription, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ProjectId::new(),
            name,
            description,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the project description.
    #[must_use]
    pub const fn description(&self) -> &ProjectDescription {
        &self.description
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the project name.
    ///
    /// Uniqueness across projects is a storage-wide rule and is enforced by
    /// the service and repository, not here.
    pub fn rename(&mut self, name: ProjectName, clock: &impl Clock) {
        self.name = name;
        self.touch(clock);
    }

    /// Replaces the project description.
    pub fn redescribe(&mut self, description: ProjectDescription, clock: &impl Clock) {
        self.description = description;
        self.touch(clock);
    }

    /// Creates a task owned by this project.
    ///
    /// `current_task_count` is the number of tasks the project already owns,
    /// as reported by storage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskLimitReached`] when the project is
    /// already at capacity.
    pub fn add_task(
        &self,
        draft: TaskDraft,
        current_task_count: usize,
        limits: &TaskLimits,
        clock: &impl Clock,
    ) -> Result<Task, TaskDomainError> {
        limits.ensure_capacity(self.id, current_task_count)?;
        Ok(Task::new(self.id, draft, clock))
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
