//! Task aggregate and the value objects used to create and edit it.

use super::{Deadline, TaskDescription, TaskId, TaskStatus, TaskTitle};
use crate::project::domain::ProjectId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated input for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: TaskTitle,
    description: TaskDescription,
    deadline: Option<Deadline>,
}

impl TaskDraft {
    /// Creates a draft with an empty description and no deadline.
    #[must_use]
    pub fn new(title: TaskTitle) -> Self {
        Self {
            title,
            description: TaskDescription::default(),
            deadline: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: TaskDescription) -> Self {
        self.description = description;
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Field-level edits applied to an existing task.
///
/// `None` leaves the corresponding field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement description.
    pub description: Option<TaskDescription>,
    /// Replacement status.
    pub status: Option<TaskStatus>,
    /// Replacement deadline.
    pub deadline: Option<Deadline>,
}

impl TaskChanges {
    /// Returns `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.deadline.is_none()
    }
}

/// Task aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: TaskTitle,
    description: TaskDescription,
    status: TaskStatus,
    deadline: Option<Deadline>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted deadline, if any.
    pub deadline: Option<Deadline>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task in the `todo` status.
    ///
    /// Only reachable through [`crate::project::domain::Project::add_task`],
    /// which enforces the per-project cap.
    pub(crate) fn new(project_id: ProjectId, draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let TaskDraft {
            title,
            description,
            deadline,
        } = draft;

        Self {
            id: TaskId::new(),
            project_id,
            title,
            description,
            status: TaskStatus::Todo,
            deadline,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            status: data.status,
            deadline: data.deadline,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Deadline> {
        self.deadline
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

    /// Returns `true` when the deadline lies before `today` and the task is
    /// not done.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.status.is_done()
            && self
                .deadline
                .is_some_and(|deadline| deadline.has_passed(today))
    }

    /// Sets the status. Setting the current status again is a no-op apart
    /// from the timestamp.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    /// Marks the task done at `closed_at` if it is overdue on `today`.
    ///
    /// Returns `false` and leaves the task untouched otherwise.
    pub fn close_if_overdue(&mut self, today: NaiveDate, closed_at: DateTime<Utc>) -> bool {
        if !self.is_overdue(today) {
            return false;
        }
        self.status = TaskStatus::Done;
        self.updated_at = closed_at;
        true
    }

    /// Applies every field present in `changes`.
    pub fn apply(&mut self, changes: TaskChanges, clock: &impl Clock) {
        let TaskChanges {
            title,
            description,
            status,
            deadline,
        } = changes;

        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        if let Some(new_status) = status {
            self.status = new_status;
        }
        if let Some(new_deadline) = deadline {
            self.deadline = Some(new_deadline);
        }
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
