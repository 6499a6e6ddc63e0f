//! Per-project task cap.

use super::TaskDomainError;
use crate::project::domain::ProjectId;

/// Default cap on the number of tasks in one project.
pub const DEFAULT_MAX_TASKS_PER_PROJECT: usize = 10;

/// Limits enforced when adding tasks to a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskLimits {
    /// Maximum number of tasks a single project may own.
    pub max_tasks_per_project: usize,
}

impl Default for TaskLimits {
    fn default() -> Self {
        Self {
            max_tasks_per_project: DEFAULT_MAX_TASKS_PER_PROJECT,
        }
    }
}

impl TaskLimits {
    /// Creates limits with the given per-project cap.
    #[must_use]
    pub const fn new(max_tasks_per_project: usize) -> Self {
        Self {
            max_tasks_per_project,
        }
    }

    /// Checks that `project` can take one more task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskLimitReached`] when `current_count`
    /// already equals or exceeds the cap.
    pub const fn ensure_capacity(
        &self,
        project: ProjectId,
        current_count: usize,
    ) -> Result<(), TaskDomainError> {
        if current_count >= self.max_tasks_per_project {
            return Err(TaskDomainError::TaskLimitReached {
                project,
                max: self.max_tasks_per_project,
            });
        }
        Ok(())
    }
}
