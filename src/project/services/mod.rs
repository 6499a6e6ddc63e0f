//! Application services for project lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    CreateProjectRequest, ProjectLifecycleService, ProjectServiceError, ProjectServiceResult,
    UpdateProjectRequest,
};
