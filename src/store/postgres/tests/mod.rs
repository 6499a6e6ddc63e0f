//! Unit tests for mapping Diesel failures onto repository errors.

use super::{project_repository, task_repository};
use crate::error::ErrorKind;
use crate::project::{
    domain::{ProjectId, ProjectName},
    ports::ProjectRepositoryError,
};
use crate::task::{domain::TaskId, ports::TaskRepositoryError};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use rstest::rstest;

/// Database error details carrying a constraint name.
#[derive(Debug)]
struct ConstraintViolation(&'static str);

impl DatabaseErrorInformation for ConstraintViolation {
    fn message(&self) -> &str {
        "duplicate key value violates unique constraint"
    }

    fn details(&self) -> Option<&str> {
        None
    }

    fn hint(&self) -> Option<&str> {
        None
    }

    fn table_name(&self) -> Option<&str> {
        None
    }

    fn column_name(&self) -> Option<&str> {
        None
    }

    fn constraint_name(&self) -> Option<&str> {
        Some(self.0)
    }

    fn statement_position(&self) -> Option<i32> {
        None
    }
}

fn violation(kind: DatabaseErrorKind, constraint: &'static str) -> DieselError {
    DieselError::DatabaseError(kind, Box::new(ConstraintViolation(constraint)))
}

fn name() -> ProjectName {
    ProjectName::new("Inbox").expect("valid name")
}

#[rstest]
fn name_constraint_maps_to_duplicate_name() {
    let err = project_repository::map_insert_error(
        violation(DatabaseErrorKind::UniqueViolation, "projects_name_unique"),
        ProjectId::new(),
        &name(),
    );

    assert!(matches!(err, ProjectRepositoryError::DuplicateName(ref dup) if dup == &name()));
    assert_eq!(err.kind(), ErrorKind::DuplicateName);
}

#[rstest]
fn primary_key_conflict_maps_to_duplicate_project() {
    let project_id = ProjectId::new();
    let err = project_repository::map_insert_error(
        violation(DatabaseErrorKind::UniqueViolation, "projects_pkey"),
        project_id,
        &name(),
    );

    assert!(matches!(err, ProjectRepositoryError::DuplicateProject(id) if id == project_id));
}

#[rstest]
fn rename_onto_taken_name_maps_to_duplicate_name() {
    let err = project_repository::map_update_error(
        violation(DatabaseErrorKind::UniqueViolation, "projects_name_unique"),
        &name(),
    );

    assert_eq!(err.kind(), ErrorKind::DuplicateName);
}

#[rstest]
fn other_project_failures_are_persistence_errors() {
    let err =
        project_repository::map_insert_error(DieselError::NotFound, ProjectId::new(), &name());

    assert_eq!(err.kind(), ErrorKind::Persistence);
}

#[rstest]
fn missing_owner_maps_to_project_not_found() {
    let project_id = ProjectId::new();
    let err = task_repository::map_insert_error(
        violation(DatabaseErrorKind::ForeignKeyViolation, "tasks_project_id_fkey"),
        TaskId::new(),
        project_id,
    );

    assert!(matches!(err, TaskRepositoryError::ProjectNotFound(id) if id == project_id));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[rstest]
fn task_key_conflict_maps_to_duplicate_task() {
    let task_id = TaskId::new();
    let err = task_repository::map_insert_error(
        violation(DatabaseErrorKind::UniqueViolation, "tasks_pkey"),
        task_id,
        ProjectId::new(),
    );

    assert!(matches!(err, TaskRepositoryError::DuplicateTask(id) if id == task_id));
}

#[rstest]
fn diesel_errors_convert_to_persistence_errors() {
    let project_err = ProjectRepositoryError::from(DieselError::RollbackTransaction);
    let task_err = TaskRepositoryError::from(DieselError::RollbackTransaction);

    assert_eq!(project_err.kind(), ErrorKind::Persistence);
    assert_eq!(task_err.kind(), ErrorKind::Persistence);
}
