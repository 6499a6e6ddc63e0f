//! Scripted console sessions over the in-memory store.

use crate::console::{Console, MenuChoice};
use crate::project::{
    domain::ProjectLimits,
    services::{CreateProjectRequest, ProjectLifecycleService},
};
use crate::store::InMemoryStore;
use crate::task::{
    domain::{TaskLimits, TaskStatus},
    services::{CreateTaskRequest, TaskLifecycleService},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type Projects = ProjectLifecycleService<InMemoryStore, DefaultClock>;
type Tasks = TaskLifecycleService<InMemoryStore, InMemoryStore, DefaultClock>;

#[fixture]
fn services() -> (Projects, Tasks) {
    let store = Arc::new(InMemoryStore::new());
    let clock = Arc::new(DefaultClock);
    (
        ProjectLifecycleService::new(
            Arc::clone(&store),
            Arc::clone(&clock),
            ProjectLimits::default(),
        ),
        TaskLifecycleService::new(
            Arc::clone(&store),
            store,
            clock,
            TaskLimits::default(),
        ),
    )
}

async fn run_script(services: &(Projects, Tasks), script: &str) -> String {
    let mut output = Vec::new();
    let console = Console::new(
        services.0.clone(),
        services.1.clone(),
        script.as_bytes(),
        &mut output,
    );
    console.run().await.expect("console session");
    String::from_utf8(output).expect("utf-8 output")
}

#[rstest]
#[case("1", Some(MenuChoice::CreateProject))]
#[case(" 10 ", Some(MenuChoice::Exit))]
#[case("11", None)]
#[case("zero", None)]
fn menu_choice_parses_numbers(#[case] input: &str, #[case] expected: Option<MenuChoice>) {
    assert_eq!(MenuChoice::parse(input), expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_and_list_projects(services: (Projects, Tasks)) {
    let transcript = run_script(&services, "1\nApollo\nMoon landing\n2\n10\n").await;

    assert!(transcript.contains("Project 'Apollo' created"));
    assert!(transcript.contains("Name: Apollo"));
    assert!(transcript.contains("Description: Moon landing"));
    assert!(transcript.ends_with("Goodbye!\n"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_choice_reprompts(services: (Projects, Tasks)) {
    let transcript = run_script(&services, "42\n10\n").await;

    assert!(transcript.contains("Invalid choice. Please try again."));
    assert_eq!(transcript.matches("1. Create a new project").count(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn end_of_input_ends_the_session(services: (Projects, Tasks)) {
    let transcript = run_script(&services, "2\n").await;

    assert!(transcript.contains("No projects found."));
    assert!(transcript.ends_with("Goodbye!\n"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn service_errors_are_printed_and_the_menu_continues(services: (Projects, Tasks)) {
    let transcript = run_script(&services, "1\n\n\n2\n10\n").await;

    assert!(transcript.contains("Error: "));
    assert!(transcript.contains("No projects found."));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_update_and_task_listing(services: (Projects, Tasks)) {
    let project = services
        .0
        .create(CreateProjectRequest::new("Gemini"))
        .await
        .expect("project creation");
    let task = services
        .1
        .create(CreateTaskRequest::new(project.id(), "Dock capsules"))
        .await
        .expect("task creation");

    let script = format!("6\n{}\nDONE\n4\n{}\n10\n", task.id(), project.id());
    let transcript = run_script(&services, &script).await;

    assert!(transcript.contains("Task status set to done."));
    assert!(transcript.contains("Title: Dock capsules"));
    assert!(transcript.contains("Deadline: none"));
    let stored = services.1.get(task.id()).await.expect("task lookup");
    assert_eq!(stored.status(), TaskStatus::Done);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_ids_are_reported_without_calling_services(services: (Projects, Tasks)) {
    let transcript = run_script(&services, "9\nnot-a-uuid\n10\n").await;

    assert!(transcript.contains("no project found with ID 'not-a-uuid'"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_task_skips_blank_answers(services: (Projects, Tasks)) {
    let project = services
        .0
        .create(CreateProjectRequest::new("Mercury"))
        .await
        .expect("project creation");
    let task = services
        .1
        .create(
            CreateTaskRequest::new(project.id(), "Orbit")
                .with_description("Three orbits")
                .with_deadline("2030-01-01"),
        )
        .await
        .expect("task creation");

    let script = format!("5\n{}\nOrbit twice\n\n\n\n10\n", task.id());
    let transcript = run_script(&services, &script).await;

    assert!(transcript.contains("Task updated successfully."));
    let stored = services.1.get(task.id()).await.expect("task lookup");
    assert_eq!(stored.title().as_str(), "Orbit twice");
    assert_eq!(stored.description().as_str(), "Three orbits");
    assert_eq!(
        stored.deadline().map(|deadline| deadline.to_string()),
        Some("2030-01-01".to_owned())
    );
}
