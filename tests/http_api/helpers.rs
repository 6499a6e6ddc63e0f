//! Request helpers for driving the router without a socket.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use mockable::DefaultClock;
use rstest::fixture;
use serde_json::Value;
use std::sync::Arc;
use taskboard::http::{AppState, router};
use taskboard::project::{domain::ProjectLimits, services::ProjectLifecycleService};
use taskboard::store::InMemoryStore;
use taskboard::task::{domain::TaskLimits, services::TaskLifecycleService};
use tower::ServiceExt;

/// Router over a fresh in-memory store.
#[fixture]
pub fn app() -> Router {
    let store = Arc::new(InMemoryStore::new());
    let clock = Arc::new(DefaultClock);
    let projects = ProjectLifecycleService::new(
        Arc::clone(&store),
        Arc::clone(&clock),
        ProjectLimits::default(),
    );
    let tasks =
        TaskLifecycleService::new(Arc::clone(&store), store, clock, TaskLimits::default());
    router(AppState::new(projects, tasks))
}

/// Sends one request and returns the status and decoded JSON body.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("valid request");

    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, json)
}

/// Creates a project and returns its id.
pub async fn create_project(app: &Router, name: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/projects/",
        Some(serde_json::json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {body}");
    body["id"].as_str().expect("id string").to_owned()
}

/// Creates a task in `project_id` and returns its id.
pub async fn create_task(app: &Router, project_id: &str, payload: Value) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        &format!("/api/v1/tasks/project/{project_id}"),
        Some(payload),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {body}");
    body["id"].as_str().expect("id string").to_owned()
}
