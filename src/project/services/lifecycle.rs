//! Service layer for creating, editing, listing and deleting projects.

use crate::error::ErrorKind;
use crate::project::{
    domain::{
        Project, ProjectDescription, ProjectDomainError, ProjectId, ProjectLimits, ProjectName,
    },
    ports::{ProjectRepository, ProjectRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: Option<String>,
}

impl CreateProjectRequest {
    /// Creates a request with the required name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for a partial project update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    project_id: ProjectId,
    name: Option<String>,
    description: Option<String>,
}

impl UpdateProjectRequest {
    /// Creates an update that changes nothing yet.
    #[must_use]
    pub const fn new(project_id: ProjectId) -> Self {
        Self {
            project_id,
            name: None,
            description: None,
        }
    }

    /// Sets the new name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
}

impl ProjectServiceError {
    /// Classifies the error for boundary adapters.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::Repository(err) => err.kind(),
        }
    }
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project lifecycle orchestration service.
pub struct ProjectLifecycleService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    limits: ProjectLimits,
}

impl<R, C> Clone for ProjectLifecycleService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            limits: self.limits,
        }
    }
}

impl<R, C> ProjectLifecycleService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, limits: ProjectLimits) -> Self {
        Self {
            repository,
            clock,
            limits,
        }
    }

    /// Returns the limits this service enforces.
    #[must_use]
    pub const fn limits(&self) -> &ProjectLimits {
        &self.limits
    }

    /// Creates and registers a new project.
    ///
    /// Fields are validated first, then the project cap, then name
    /// uniqueness. The cap is checked again by the repository while storing,
    /// so concurrent creations cannot exceed it.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Domain`] when a field is invalid or the
    /// project cap is reached, and [`ProjectServiceError::Repository`] with
    /// [`ProjectRepositoryError::DuplicateName`] when the name is taken.
    pub async fn create(&self, request: CreateProjectRequest) -> ProjectServiceResult<Project> {
        let CreateProjectRequest { name, description } = request;
        let project_name = ProjectName::new(name)?;
        let project_description = ProjectDescription::new(
            description.unwrap_or_default(),
            self.limits.description_policy,
        )?;

        let current = self.repository.count().await?;
        self.limits.ensure_capacity(current)?;
        self.ensure_name_available(&project_name, None).await?;

        let project = Project::new(project_name, project_description, &*self.clock);
        self.repository
            .store_within_limit(&project, self.limits.max_projects)
            .await
            .map_err(|err| match err {
                ProjectRepositoryError::LimitReached { max } => {
                    ProjectServiceError::Domain(ProjectDomainError::ProjectLimitReached { max })
                }
                other => ProjectServiceError::Repository(other),
            })?;
        tracing::info!(project_id = %project.id(), name = %project.name(), "project created");
        Ok(project)
    }

    /// Retrieves a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] (wrapped) when the
    /// project does not exist.
    pub async fn get(&self, project_id: ProjectId) -> ProjectServiceResult<Project> {
        self.find_or_error(project_id).await
    }

    /// Returns every live project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list(&self) -> ProjectServiceResult<Vec<Project>> {
        Ok(self.repository.list().await?)
    }

    /// Renames a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError`] when the project is missing, the name
    /// is invalid, or another project already uses it.
    pub async fn rename(
        &self,
        project_id: ProjectId,
        name: impl Into<String>,
    ) -> ProjectServiceResult<Project> {
        self.update(UpdateProjectRequest::new(project_id).with_name(name))
            .await
    }

    /// Replaces a project's description.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError`] when the project is missing or the
    /// description violates the configured policy.
    pub async fn redescribe(
        &self,
        project_id: ProjectId,
        description: impl Into<String>,
    ) -> ProjectServiceResult<Project> {
        self.update(UpdateProjectRequest::new(project_id).with_description(description))
            .await
    }

    /// Applies a partial update and persists it once.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError`] when the project is missing, a provided
    /// field is invalid, or the new name is taken by another project.
    pub async fn update(&self, request: UpdateProjectRequest) -> ProjectServiceResult<Project> {
        let UpdateProjectRequest {
            project_id,
            name,
            description,
        } = request;

        let mut project = self.find_or_error(project_id).await?;

        if let Some(raw_name) = name {
            let project_name = ProjectName::new(raw_name)?;
            self.ensure_name_available(&project_name, Some(project_id))
                .await?;
            project.rename(project_name, &*self.clock);
        }
        if let Some(raw_description) = description {
            let project_description =
                ProjectDescription::new(raw_description, self.limits.description_policy)?;
            project.redescribe(project_description, &*self.clock);
        }

        self.repository.update(&project).await?;
        Ok(project)
    }

    /// Deletes a project and every task it owns.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] (wrapped) when the
    /// project does not exist.
    pub async fn delete(&self, project_id: ProjectId) -> ProjectServiceResult<()> {
        self.repository.delete(project_id).await?;
        tracing::info!(%project_id, "project deleted");
        Ok(())
    }

    async fn find_or_error(&self, project_id: ProjectId) -> ProjectServiceResult<Project> {
        self.repository
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| ProjectRepositoryError::NotFound(project_id).into())
    }

    /// Fails when a project other than `owner` already uses `name`.
    async fn ensure_name_available(
        &self,
        name: &ProjectName,
        owner: Option<ProjectId>,
    ) -> ProjectServiceResult<()> {
        let existing = self.repository.find_by_name(name).await?;
        match existing {
            Some(other) if Some(other.id()) != owner => {
                Err(ProjectRepositoryError::DuplicateName(name.clone()).into())
            }
            _ => Ok(()),
        }
    }
}
