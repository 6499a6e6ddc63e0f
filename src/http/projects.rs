//! Project routes.

use super::{
    AppState, ApiError,
    dto::{CreateProjectBody, DetailBody, ProjectBody, UpdateProjectBody},
};
use crate::project::{
    domain::ProjectId,
    ports::ProjectRepository,
    services::{CreateProjectRequest, UpdateProjectRequest},
};
use crate::task::ports::TaskRepository;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use mockable::Clock;

pub(super) fn parse_project_id(raw: &str) -> Result<ProjectId, ApiError> {
    raw.parse().map_err(|_| ApiError::not_found("project", raw))
}

pub(super) async fn list<P, T, C>(
    State(state): State<AppState<P, T, C>>,
) -> Result<Json<Vec<ProjectBody>>, ApiError>
where
    P: ProjectRepository + 'static,
    T: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let projects = state.projects.list().await?;
    Ok(Json(projects.iter().map(ProjectBody::from).collect()))
}

pub(super) async fn create<P, T, C>(
    State(state): State<AppState<P, T, C>>,
    payload: Result<Json<CreateProjectBody>, JsonRejection>,
) -> Result<(StatusCode, Json<ProjectBody>), ApiError>
where
    P: ProjectRepository + 'static,
    T: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(body) = payload?;
    let mut request = CreateProjectRequest::new(body.name);
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    let project = state.projects.create(request).await?;
    Ok((StatusCode::CREATED, Json(ProjectBody::from(&project))))
}

pub(super) async fn get<P, T, C>(
    State(state): State<AppState<P, T, C>>,
    Path(raw_id): Path<String>,
) -> Result<Json<ProjectBody>, ApiError>
where
    P: ProjectRepository + 'static,
    T: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let project_id = parse_project_id(&raw_id)?;
    let project = state.projects.get(project_id).await?;
    Ok(Json(ProjectBody::from(&project)))
}

pub(super) async fn update<P, T, C>(
    State(state): State<AppState<P, T, C>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateProjectBody>, JsonRejection>,
) -> Result<Json<ProjectBody>, ApiError>
where
    P: ProjectRepository + 'static,
    T: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let project_id = parse_project_id(&raw_id)?;
    let Json(body) = payload?;
    let mut request = UpdateProjectRequest::new(project_id);
    if let Some(name) = body.name {
        request = request.with_name(name);
    }
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    let project = state.projects.update(request).await?;
    Ok(Json(ProjectBody::from(&project)))
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
    let project_id = parse_project_id(&raw_id)?;
    state.projects.delete(project_id).await?;
    Ok(Json(DetailBody {
        detail: "Project deleted successfully.".to_owned(),
    }))
}
