//! Task routes.

use super::helpers::{app, create_project, create_task, send};
use axum::Router;
use axum::http::{Method, StatusCode};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_returns_201_with_todo_status(app: Router) {
    let project_id = create_project(&app, "Apollo").await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/tasks/project/{project_id}/"),
        Some(json!({ "title": "Launch", "deadline": "2030-07-16" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "todo");
    assert_eq!(body["deadline"], "2030-07-16");
    assert_eq!(body["project_id"], project_id.as_str());
    assert_eq!(body["description"], "");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_returns_the_projects_tasks(app: Router) {
    let project_id = create_project(&app, "Apollo").await;
    create_task(&app, &project_id, json!({ "title": "Launch" })).await;
    create_task(&app, &project_id, json!({ "title": "Land" })).await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/tasks/project/{project_id}"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .expect("array body")
        .iter()
        .filter_map(|task| task["title"].as_str())
        .collect();
    assert_eq!(titles, ["Launch", "Land"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_of_a_missing_project_are_404(app: Router) {
    let unknown = uuid::Uuid::new_v4();

    let (list_status, _) = send(
        &app,
        Method::GET,
        &format!("/api/v1/tasks/project/{unknown}"),
        None,
    )
    .await;
    let (create_status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/tasks/project/{unknown}"),
        Some(json!({ "title": "Orphan" })),
    )
    .await;

    assert_eq!(list_status, StatusCode::NOT_FOUND);
    assert_eq!(create_status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_deadline_is_400(app: Router) {
    let project_id = create_project(&app, "Apollo").await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/tasks/project/{project_id}"),
        Some(json!({ "title": "Leap", "deadline": "2024-02-30" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn eleventh_task_is_400_limit_exceeded(app: Router) {
    let project_id = create_project(&app, "Apollo").await;
    for index in 0..10 {
        create_task(&app, &project_id, json!({ "title": format!("Task {index}") })).await;
    }

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/tasks/project/{project_id}"),
        Some(json!({ "title": "Eleventh" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "limit_exceeded");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn patch_status_is_case_insensitive(app: Router) {
    let project_id = create_project(&app, "Apollo").await;
    let task_id = create_task(&app, &project_id, json!({ "title": "Launch" })).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/tasks/{task_id}/status"),
        Some(json!({ "status": " Done " })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "done");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_status_is_400(app: Router) {
    let project_id = create_project(&app, "Apollo").await;
    let task_id = create_task(&app, &project_id, json!({ "title": "Launch" })).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/tasks/{task_id}/status"),
        Some(json!({ "status": "archived" })),
    )
    .await;
    let (_, stored) = send(&app, Method::GET, &format!("/api/v1/tasks/{task_id}"), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");
    assert_eq!(stored["status"], "todo");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn put_updates_only_given_fields(app: Router) {
    let project_id = create_project(&app, "Apollo").await;
    let task_id = create_task(
        &app,
        &project_id,
        json!({ "title": "Launch", "description": "Saturn V", "deadline": "2030-07-16" }),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/tasks/{task_id}"),
        Some(json!({ "title": "Launch again" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Launch again");
    assert_eq!(body["description"], "Saturn V");
    assert_eq!(body["deadline"], "2030-07-16");
    assert_eq!(body["status"], "todo");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_then_get_is_404(app: Router) {
    let project_id = create_project(&app, "Apollo").await;
    let task_id = create_task(&app, &project_id, json!({ "title": "Launch" })).await;
    let uri = format!("/api/v1/tasks/{task_id}");

    let (deleted, body) = send(&app, Method::DELETE, &uri, None).await;
    let (fetched, _) = send(&app, Method::GET, &uri, None).await;
    let (deleted_again, _) = send(&app, Method::DELETE, &uri, None).await;

    assert_eq!(deleted, StatusCode::OK);
    assert_eq!(body["detail"], "Task deleted successfully.");
    assert_eq!(fetched, StatusCode::NOT_FOUND);
    assert_eq!(deleted_again, StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_task_id_is_404(app: Router) {
    let (status, body) = send(&app, Method::GET, "/api/v1/tasks/12345", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}
