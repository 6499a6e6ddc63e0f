//! Project persistence through the `PostgreSQL` adapter.

use super::helpers::{prepared_store, project, task};
use mockable::DefaultClock;
use taskboard::project::domain::{DescriptionPolicy, ProjectDescription, ProjectId, ProjectName};
use taskboard::project::ports::{ProjectRepository, ProjectRepositoryError};
use taskboard::task::ports::TaskRepository;

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs TASKBOARD_TEST_DATABASE_URL pointing at a PostgreSQL server"]
async fn store_and_find_by_id_and_name() {
    let ctx = prepared_store().await;
    let apollo = project("Apollo");

    ctx.projects.store(&apollo).await.expect("store project");

    let by_id = ctx
        .projects
        .find_by_id(apollo.id())
        .await
        .expect("lookup")
        .expect("project exists");
    let by_name = ctx
        .projects
        .find_by_name(apollo.name())
        .await
        .expect("lookup")
        .expect("project exists");
    assert_eq!(by_id.id(), apollo.id());
    assert_eq!(by_name.id(), apollo.id());
    assert_eq!(by_id.name().as_str(), "Apollo");
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs TASKBOARD_TEST_DATABASE_URL pointing at a PostgreSQL server"]
async fn duplicate_names_are_rejected_by_the_constraint() {
    let ctx = prepared_store().await;
    ctx.projects
        .store(&project("Apollo"))
        .await
        .expect("first project");

    let result = ctx.projects.store(&project("Apollo")).await;

    assert!(matches!(
        result,
        Err(ProjectRepositoryError::DuplicateName(name)) if name.as_str() == "Apollo"
    ));
    assert_eq!(ctx.projects.count().await.expect("count"), 1);
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs TASKBOARD_TEST_DATABASE_URL pointing at a PostgreSQL server"]
async fn list_keeps_creation_order() {
    let ctx = prepared_store().await;
    let names = ["Mercury", "Gemini", "Apollo"];
    for name in names {
        ctx.projects
            .store(&project(name))
            .await
            .expect("store project");
    }

    let listed: Vec<String> = ctx
        .projects
        .list()
        .await
        .expect("list")
        .iter()
        .map(|listed_project| listed_project.name().as_str().to_owned())
        .collect();

    assert_eq!(listed, names);
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs TASKBOARD_TEST_DATABASE_URL pointing at a PostgreSQL server"]
async fn update_persists_name_and_description() {
    let ctx = prepared_store().await;
    let mut apollo = project("Apollo");
    ctx.projects.store(&apollo).await.expect("store project");

    apollo.rename(ProjectName::new("Artemis").expect("valid name"), &DefaultClock);
    apollo.redescribe(
        ProjectDescription::new("Back to the Moon", DescriptionPolicy::CeilingOnly)
            .expect("valid description"),
        &DefaultClock,
    );
    ctx.projects.update(&apollo).await.expect("update project");

    let stored = ctx
        .projects
        .find_by_id(apollo.id())
        .await
        .expect("lookup")
        .expect("project exists");
    assert_eq!(stored.name().as_str(), "Artemis");
    assert_eq!(stored.description().as_str(), "Back to the Moon");
    assert!(
        ctx.projects
            .find_by_name(&ProjectName::new("Apollo").expect("valid name"))
            .await
            .expect("lookup")
            .is_none()
    );
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs TASKBOARD_TEST_DATABASE_URL pointing at a PostgreSQL server"]
async fn missing_projects_report_not_found() {
    let ctx = prepared_store().await;
    let ghost = project("Ghost");

    let update = ctx.projects.update(&ghost).await;
    let delete = ctx.projects.delete(ProjectId::new()).await;

    assert!(matches!(update, Err(ProjectRepositoryError::NotFound(id)) if id == ghost.id()));
    assert!(matches!(delete, Err(ProjectRepositoryError::NotFound(_))));
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs TASKBOARD_TEST_DATABASE_URL pointing at a PostgreSQL server"]
async fn delete_cascades_to_tasks() {
    let ctx = prepared_store().await;
    let apollo = project("Apollo");
    ctx.projects.store(&apollo).await.expect("store project");
    let launch = task(&apollo, "Launch", None);
    ctx.tasks.store(&launch).await.expect("store task");

    ctx.projects.delete(apollo.id()).await.expect("delete project");

    assert!(
        ctx.tasks
            .find_by_id(launch.id())
            .await
            .expect("lookup")
            .is_none()
    );
    assert_eq!(ctx.projects.count().await.expect("count"), 0);
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs TASKBOARD_TEST_DATABASE_URL pointing at a PostgreSQL server"]
async fn capped_store_refuses_past_the_limit() {
    let ctx = prepared_store().await;
    for name in ["Mercury", "Gemini"] {
        ctx.projects
            .store_within_limit(&project(name), 2)
            .await
            .expect("under the cap");
    }

    let result = ctx.projects.store_within_limit(&project("Apollo"), 2).await;

    assert!(matches!(
        result,
        Err(ProjectRepositoryError::LimitReached { max: 2 })
    ));
    assert_eq!(ctx.projects.count().await.expect("count"), 2);
}
