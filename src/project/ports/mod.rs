//! Port contracts for project lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by project services.

pub mod repository;

pub use repository::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult};
