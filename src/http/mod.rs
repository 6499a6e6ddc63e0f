//! JSON API over the project and task services.
//!
//! Handlers parse path ids and bodies, call a service and translate the
//! result. Malformed ids are answered with 404 because they cannot name a
//! stored entity. Every failure body has the shape
//! `{"error": <kind>, "detail": <message>}`.

pub mod dto;
mod error;
mod projects;
mod tasks;

pub use error::ApiError;

use crate::project::{ports::ProjectRepository, services::ProjectLifecycleService};
use crate::task::{ports::TaskRepository, services::TaskLifecycleService};
use axum::routing::{get, patch};
use axum::{Json, Router};
use mockable::Clock;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Services shared by all handlers.
pub struct AppState<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    projects: ProjectLifecycleService<P, C>,
    tasks: TaskLifecycleService<T, P, C>,
}

impl<P, T, C> Clone for AppState<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            projects: self.projects.clone(),
            tasks: self.tasks.clone(),
        }
    }
}

impl<P, T, C> AppState<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Bundles the services for the router.
    #[must_use]
    pub const fn new(
        projects: ProjectLifecycleService<P, C>,
        tasks: TaskLifecycleService<T, P, C>,
    ) -> Self {
        Self { projects, tasks }
    }
}

/// Builds the API router.
///
/// Collection paths answer with and without a trailing slash.
#[must_use]
pub fn router<P, T, C>(state: AppState<P, T, C>) -> Router
where
    P: ProjectRepository + 'static,
    T: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let project_collection =
        get(projects::list::<P, T, C>).post(projects::create::<P, T, C>);
    let project_item = get(projects::get::<P, T, C>)
        .put(projects::update::<P, T, C>)
        .delete(projects::delete::<P, T, C>);
    let project_tasks =
        get(tasks::list_for_project::<P, T, C>).post(tasks::create_for_project::<P, T, C>);
    let task_item = get(tasks::get::<P, T, C>)
        .put(tasks::update::<P, T, C>)
        .delete(tasks::delete::<P, T, C>);

    Router::new()
        .route("/health", get(health))
        .route("/api/v1/projects", project_collection.clone())
        .route("/api/v1/projects/", project_collection)
        .route("/api/v1/projects/{id}", project_item)
        .route("/api/v1/tasks/project/{project_id}", project_tasks.clone())
        .route("/api/v1/tasks/project/{project_id}/", project_tasks)
        .route("/api/v1/tasks/{id}", task_item)
        .route(
            "/api/v1/tasks/{id}/status",
            patch(tasks::update_status::<P, T, C>),
        )
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Serves `app` on `listener` until `shutdown` is cancelled.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "http api listening");
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
}
