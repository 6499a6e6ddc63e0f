//! Given steps for project and task lifecycle scenarios.

use super::world::{LifecycleWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::project::services::CreateProjectRequest;
use taskboard::task::services::CreateTaskRequest;

#[given("an empty task board")]
fn empty_task_board(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    let existing = run_async(world.projects.list()).wrap_err("list projects")?;
    if !existing.is_empty() {
        return Err(eyre::eyre!("expected no projects, found {}", existing.len()));
    }
    Ok(())
}

#[given("{count:usize} projects already exist")]
fn projects_already_exist(world: &mut LifecycleWorld, count: usize) -> Result<(), eyre::Report> {
    for index in 0..count {
        run_async(
            world
                .projects
                .create(CreateProjectRequest::new(format!("Existing {index}"))),
        )
        .wrap_err("create existing project")?;
    }
    Ok(())
}

#[given(r#"a project named "{name}" exists"#)]
fn project_exists(world: &mut LifecycleWorld, name: String) -> Result<(), eyre::Report> {
    let created = run_async(world.projects.create(CreateProjectRequest::new(name)))
        .wrap_err("create project in scenario setup")?;
    world.last_project = Some(created);
    Ok(())
}

#[given(r#"a task titled "{title}" due "{deadline}" exists in the project"#)]
fn task_exists(
    world: &mut LifecycleWorld,
    title: String,
    deadline: String,
) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let created = run_async(
        world
            .tasks
            .create(CreateTaskRequest::new(project_id, title).with_deadline(deadline)),
    )
    .wrap_err("create task in scenario setup")?;
    world.last_task = Some(created);
    Ok(())
}
