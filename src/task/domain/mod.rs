//! Domain model for tasks.
//!
//! Titles, descriptions, statuses and deadlines are validated on
//! construction, so a [`Task`] never holds a value outside its rules.

mod deadline;
mod error;
mod ids;
mod limits;
mod status;
mod task;
mod text;

pub use deadline::Deadline;
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use limits::{DEFAULT_MAX_TASKS_PER_PROJECT, TaskLimits};
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task, TaskChanges, TaskDraft};
pub use text::{TaskDescription, TaskTitle};
