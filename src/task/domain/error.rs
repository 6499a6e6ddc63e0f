//! Error types for task domain validation and parsing.

use crate::error::ErrorKind;
use crate::project::domain::ProjectId;
use thiserror::Error;

/// Errors returned while constructing task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title has more words than allowed.
    #[error("task title has {count} words, at most {max} are allowed")]
    TitleTooManyWords {
        /// Words found in the title.
        count: usize,
        /// Configured ceiling.
        max: usize,
    },

    /// The task description has more words than allowed.
    #[error("task description has {count} words, at most {max} are allowed")]
    DescriptionTooManyWords {
        /// Words found in the description.
        count: usize,
        /// Configured ceiling.
        max: usize,
    },

    /// The deadline is not a calendar date in `YYYY-MM-DD` form.
    #[error("invalid deadline '{0}', expected a valid date in YYYY-MM-DD format")]
    InvalidDeadline(String),

    /// The owning project already holds the configured number of tasks.
    #[error("project {project} cannot hold more than {max} tasks")]
    TaskLimitReached {
        /// Project at capacity.
        project: ProjectId,
        /// Configured per-project task cap.
        max: usize,
    },
}

impl TaskDomainError {
    /// Classifies the error for boundary adapters.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TaskLimitReached { .. } => ErrorKind::LimitExceeded,
            _ => ErrorKind::Validation,
        }
    }
}

/// Error returned while parsing task statuses from requests or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid status '{0}', expected one of todo, doing, done")]
pub struct ParseTaskStatusError(pub String);
