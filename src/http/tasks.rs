//! Task routes.

use super::{
    AppState, ApiError,
    dto::{CreateTaskBody, DetailBody, StatusBody, TaskBody, UpdateTaskBody},
    projects::parse_project_id,
};
use crate::project::ports::ProjectRepository;
use crate::task::{
    domain::TaskId,
    ports::TaskRepository,
    services::{CreateTaskRequest, UpdateTaskRequest},
};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use mockable::Clock;

fn parse_task_id(raw: &str) -> Result<TaskId, ApiError> {
    raw.parse().map_err(|_| ApiError::not_found("task", raw))
}

pub(super) async fn list_for_project<P, T, C>(
    State(state): State<AppState<P, T, C>>,
    Path(raw_project_id): Path<String>,
) -> Result<Json<Vec<TaskBody>>, ApiError>
where
    P: ProjectRepository + 'static,
    T: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let project_id = parse_project_id(&raw_project_id)?;
    let tasks = state.tasks.list(project_id).await?;
    Ok(Json(tasks.iter().map(TaskBody::from).collect()))
}

pub(super) async fn create_for_project<P, T, C>(
    State(state): State<AppState<P, T, C>>,
    Path(raw_project_id): Path<String>,
    payload: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskBody>), ApiError>
where
    P: ProjectRepository + 'static,
    T: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let project_id = parse_project_id(&raw_project_id)?;
    let Json(body) = payload?;
    let mut request = CreateTaskRequest::new(project_id, body.title);
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    if let Some(deadline) = body.deadline {
        request = request.with_deadline(deadline);
    }
    let task = state.tasks.create(request).await?;
    Ok((StatusCode::CREATED, Json(TaskBody::from(&task))))
}

pub(super) async fn get<P, T, C>(
    State(state): State<AppState<P, T, C>>,
    Path(raw_id): Path<String>,
) -> Result<Json<TaskBody>, ApiError>
where
    P: ProjectRepository + 'static,
    T: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task_id = parse_task_id(&raw_id)?;
    let task = state.tasks.get(task_id).await?;
    Ok(Json(TaskBody::from(&task)))
}

pub(super) async fn update<P, T, C>(
    State(state): State<AppState<P, T, C>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> Result<Json<TaskBody>, ApiError>
where
    P: ProjectRepository + 'static,
    T: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task_id = parse_task_id(&raw_id)?;
    let Json(body) = payload?;
    let UpdateTaskBody {
        title,
        description,
        status,
        deadline,
    } = body;

    let mut request = UpdateTaskRequest::new(task_id);
    if let Some(value) = title {
        request = request.with_title(value);
    }
    if let Some(value) = description {
        request = request.with_description(value);
    }
    if let Some(value) = status {
        request = request.with_status(value);
    }
    if let Some(value) = deadline {
        request = request.with_deadline(value);
    }
    let task = state.tasks.update(request).await?;
    Ok(Json(TaskBody::from(&task)))
}

pub(super) async fn update_status<P, T, C>(
    State(state): State<AppState<P, T, C>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<StatusBody>, JsonRejection>,
) -> Result<Json<TaskBody>, ApiError>
where
    P: ProjectRepository + 'static,
    T: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task_id = parse_task_id(&raw_id)?;
    let Json(body) = payload?;
    let task = state.tasks.update_status(task_id, &body.status).await?;
    Ok(Json(TaskBody::from(&task)))
}

pub(super) async fn delete<P, T, C>(
    State(state): State<AppState<P, T, C>>,
    Path(raw_id): Path<String>,
) -> Result<Json<DetailBody>, ApiError>
where
    P: ProjectRepository + 'static,
    T: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task_id = parse_task_id(&raw_id)?;
    state.tasks.delete(task_id).await?;
    Ok(Json(DetailBody {
        detail: "Task deleted successfully.".to_owned(),
    }))
}
