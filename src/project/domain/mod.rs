//! Domain model for projects.
//!
//! Values in this module are validated on construction, so a [`Project`]
//! always carries a non-empty name and descriptions within their ceilings.

mod error;
mod ids;
mod limits;
mod project;
mod text;

pub use error::ProjectDomainError;
pub use ids::ProjectId;
pub use limits::{DEFAULT_MAX_PROJECTS, DescriptionPolicy, ProjectLimits};
pub use project::{PersistedProjectData, Project};
pub use text::{ProjectDescription, ProjectName};
