//! Repository port for project persistence and lookup.

use crate::error::ErrorKind;
use crate::project::domain::{Project, ProjectId, ProjectName};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateProject`] when the ID
    /// already exists or [`ProjectRepositoryError::DuplicateName`] when
    /// another project has the same name.
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Stores a new project unless `max_projects` live projects already
    /// exist. The count and the insert happen atomically, so concurrent
    /// creations cannot overshoot the cap.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::LimitReached`] when the cap is
    /// reached, otherwise the errors of [`ProjectRepository::store`].
    async fn store_within_limit(
        &self,
        project: &Project,
        max_projects: usize,
    ) -> ProjectRepositoryResult<()>;

    /// Persists changes to an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does not
    /// exist or [`ProjectRepositoryError::DuplicateName`] when the new name is
    /// taken by another project.
    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Deletes a project together with every task it owns.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does not
    /// exist.
    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()>;

    /// Finds a project by identifier.
    ///
    /// Returns `None` when the project does not exist.
    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Finds a project by its unique name.
    ///
    /// Returns `None` when no project has the name.
    async fn find_by_name(&self, name: &ProjectName) -> ProjectRepositoryResult<Option<Project>>;

    /// Returns every live project in creation order.
    async fn list(&self) -> ProjectRepositoryResult<Vec<Project>>;

    /// Returns the number of live projects.
    async fn count(&self) -> ProjectRepositoryResult<usize>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// Another project already uses the name.
    #[error("a project with the name '{0}' already exists")]
    DuplicateName(ProjectName),

    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// The project cap was reached while storing.
    #[error("project limit of {max} reached")]
    LimitReached {
        /// Configured cap.
        max: usize,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the error for boundary adapters.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateName(_) => ErrorKind::DuplicateName,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::LimitReached { .. } => ErrorKind::LimitExceeded,
            Self::DuplicateProject(_) | Self::Persistence(_) => ErrorKind::Persistence,
        }
    }
}
