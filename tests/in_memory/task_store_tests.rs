//! Task persistence through the in-memory store.

use super::helpers::{project, store, task};
use chrono::{NaiveDate, Utc};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;
use taskboard::project::ports::ProjectRepository;
use taskboard::store::InMemoryStore;
use taskboard::task::domain::{Deadline, TaskChanges, TaskId, TaskStatus};
use taskboard::task::ports::{TaskRepository, TaskRepositoryError};

fn day(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid day")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_need_a_stored_project(store: Arc<InMemoryStore>) {
    let unsaved = project("Ghost");
    let orphan = task(&unsaved, "Haunt", None);

    let result = TaskRepository::store(&*store, &orphan).await;

    assert!(matches!(
        result,
        Err(TaskRepositoryError::ProjectNotFound(id)) if id == unsaved.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_and_count_follow_insertion_order(store: Arc<InMemoryStore>) {
    let apollo = project("Apollo");
    ProjectRepository::store(&*store, &apollo).await.expect("store");
    let titles = ["Launch", "Orbit", "Land"];
    for title in titles {
        TaskRepository::store(&*store, &task(&apollo, title, None))
            .await
            .expect("store task");
    }

    let listed: Vec<String> = store
        .list_by_project(apollo.id())
        .await
        .expect("list")
        .iter()
        .map(|listed_task| listed_task.title().as_str().to_owned())
        .collect();

    assert_eq!(listed, titles);
    assert_eq!(store.count_by_project(apollo.id()).await.expect("count"), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_task_updates_the_count(store: Arc<InMemoryStore>) {
    let apollo = project("Apollo");
    ProjectRepository::store(&*store, &apollo).await.expect("store");
    let launch = task(&apollo, "Launch", None);
    TaskRepository::store(&*store, &launch).await.expect("store");

    TaskRepository::delete(&*store, launch.id())
        .await
        .expect("delete");

    assert_eq!(store.count_by_project(apollo.id()).await.expect("count"), 0);
    assert!(matches!(
        TaskRepository::delete(&*store, launch.id()).await,
        Err(TaskRepositoryError::NotFound(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overdue_query_skips_done_future_and_undated_tasks(store: Arc<InMemoryStore>) {
    let apollo = project("Apollo");
    ProjectRepository::store(&*store, &apollo).await.expect("store");
    let late = task(&apollo, "Late", Some("2026-03-14"));
    let mut finished = task(&apollo, "Finished", Some("2026-03-01"));
    finished.set_status(TaskStatus::Done, &DefaultClock);
    for stored in [
        &late,
        &finished,
        &task(&apollo, "Today", Some("2026-03-15")),
        &task(&apollo, "Undated", None),
    ] {
        TaskRepository::store(&*store, stored).await.expect("store");
    }

    let overdue = store.list_overdue(day("2026-03-15")).await.expect("query");

    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue.first().map(|found| found.id()), Some(late.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn close_if_overdue_rechecks_the_stored_task(store: Arc<InMemoryStore>) {
    let apollo = project("Apollo");
    ProjectRepository::store(&*store, &apollo).await.expect("store");
    let late = task(&apollo, "Late", Some("2026-03-01"));
    let mut moved = task(&apollo, "Moved", Some("2026-03-02"));
    TaskRepository::store(&*store, &late).await.expect("store");
    TaskRepository::store(&*store, &moved).await.expect("store");
    moved.apply(
        TaskChanges {
            deadline: Some(Deadline::from_date(day("2026-12-31"))),
            ..TaskChanges::default()
        },
        &DefaultClock,
    );
    TaskRepository::update(&*store, &moved).await.expect("update");

    let today = day("2026-03-15");
    let closed_at = Utc::now();
    let closed_late = store
        .close_if_overdue(late.id(), today, closed_at)
        .await
        .expect("close late");
    let closed_moved = store
        .close_if_overdue(moved.id(), today, closed_at)
        .await
        .expect("close moved");
    let closed_again = store
        .close_if_overdue(late.id(), today, closed_at)
        .await
        .expect("close again");

    assert!(closed_late);
    assert!(!closed_moved);
    assert!(!closed_again);
    let stored_late = TaskRepository::find_by_id(&*store, late.id())
        .await
        .expect("find")
        .expect("late task");
    assert_eq!(stored_late.status(), TaskStatus::Done);
    assert_eq!(stored_late.updated_at(), closed_at);
    let stored_moved = TaskRepository::find_by_id(&*store, moved.id())
        .await
        .expect("find")
        .expect("moved task");
    assert_eq!(stored_moved, moved);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn close_if_overdue_of_unknown_task_is_false(store: Arc<InMemoryStore>) {
    let closed = store
        .close_if_overdue(TaskId::new(), day("2026-03-15"), Utc::now())
        .await
        .expect("close");

    assert!(!closed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn capped_store_refuses_a_full_project(store: Arc<InMemoryStore>) {
    let apollo = project("Apollo");
    ProjectRepository::store(&*store, &apollo).await.expect("store");
    for title in ["Launch", "Orbit"] {
        TaskRepository::store_within_limit(&*store, &task(&apollo, title, None), 2)
            .await
            .expect("under the cap");
    }

    let result = TaskRepository::store_within_limit(&*store, &task(&apollo, "Land", None), 2).await;

    assert!(matches!(
        result,
        Err(TaskRepositoryError::LimitReached { project_id, max: 2 }) if project_id == apollo.id()
    ));
    assert_eq!(store.count_by_project(apollo.id()).await.expect("count"), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn capped_store_needs_a_stored_project(store: Arc<InMemoryStore>) {
    let unsaved = project("Ghost");

    let result =
        TaskRepository::store_within_limit(&*store, &task(&unsaved, "Haunt", None), 10).await;

    assert!(matches!(
        result,
        Err(TaskRepositoryError::ProjectNotFound(id)) if id == unsaved.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_capped_stores_never_exceed_the_cap(store: Arc<InMemoryStore>) {
    let apollo = project("Apollo");
    ProjectRepository::store(&*store, &apollo).await.expect("store");

    let attempts: Vec<_> = (0..12)
        .map(|index| {
            let shared = Arc::clone(&store);
            let candidate = task(&apollo, &format!("Task {index}"), None);
            tokio::spawn(async move {
                TaskRepository::store_within_limit(&*shared, &candidate, 10).await
            })
        })
        .collect();
    let mut stored = 0_usize;
    for attempt in attempts {
        if attempt.await.expect("join").is_ok() {
            stored += 1;
        }
    }

    assert_eq!(stored, 10);
    assert_eq!(store.count_by_project(apollo.id()).await.expect("count"), 10);
}
