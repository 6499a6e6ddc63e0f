//! Line-oriented console front-end.
//!
//! Deprecated in favour of the HTTP API and kept for operators used to the
//! numbered menu. It reads one answer per line, treats blank answers to
//! optional prompts as "skip", and only ever talks to the services. Service
//! failures are printed and the menu is shown again; only I/O errors end the
//! session early.

mod menu;

pub use menu::MenuChoice;

use crate::project::{
    domain::{Project, ProjectId},
    ports::ProjectRepository,
    services::{CreateProjectRequest, ProjectLifecycleService, UpdateProjectRequest},
};
use crate::task::{
    domain::{Task, TaskId},
    ports::TaskRepository,
    services::{CreateTaskRequest, TaskLifecycleService, UpdateTaskRequest},
};
use mockable::Clock;
use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Interactive menu over the project and task services.
pub struct Console<P, T, C, R, W>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    projects: ProjectLifecycleService<P, C>,
    tasks: TaskLifecycleService<T, P, C>,
    input: R,
    output: W,
}

impl<P, T, C, R, W> Console<P, T, C, R, W>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
    R: BufRead,
    W: Write,
{
    /// Creates a console reading answers from `input` and writing to
    /// `output`.
    #[must_use]
    pub const fn new(
        projects: ProjectLifecycleService<P, C>,
        tasks: TaskLifecycleService<T, P, C>,
        input: R,
        output: W,
    ) -> Self {
        Self {
            projects,
            tasks,
            input,
            output,
        }
    }

    /// Shows the menu until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns the I/O error raised while reading input or writing output.
    pub async fn run(mut self) -> io::Result<()> {
        writeln!(self.output, "Welcome to the Project and Task Manager")?;
        tracing::warn!("the console front-end is deprecated; prefer the HTTP API");

        loop {
            self.print_menu()?;
            let Some(answer) = self.prompt("Your choice: ")? else {
                break;
            };
            match MenuChoice::parse(&answer) {
                Some(MenuChoice::Exit) => break,
                Some(choice) => self.dispatch(choice).await?,
                None => writeln!(self.output, "Invalid choice. Please try again.")?,
            }
        }

        writeln!(self.output, "Goodbye!")?;
        self.output.flush()
    }

    fn print_menu(&mut self) -> io::Result<()> {
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{}. {}", choice.number(), choice.label())?;
        }
        Ok(())
    }

    async fn dispatch(&mut self, choice: MenuChoice) -> io::Result<()> {
        match choice {
            MenuChoice::CreateProject => self.create_project().await,
            MenuChoice::ListProjects => self.list_projects().await,
            MenuChoice::AddTask => self.add_task().await,
            MenuChoice::ListTasks => self.list_tasks().await,
            MenuChoice::EditTask => self.edit_task().await,
            MenuChoice::UpdateStatus => self.update_status().await,
            MenuChoice::DeleteTask => self.delete_task().await,
            MenuChoice::EditProject => self.edit_project().await,
            MenuChoice::DeleteProject => self.delete_project().await,
            MenuChoice::Exit => Ok(()),
        }
    }

    async fn create_project(&mut self) -> io::Result<()> {
        let name = self.prompt("Project name: ")?.unwrap_or_default();
        let description = self.prompt_optional("Project description (optional): ")?;

        let mut request = CreateProjectRequest::new(name);
        if let Some(text) = description {
            request = request.with_description(text);
        }
        match self.projects.create(request).await {
            Ok(project) => writeln!(
                self.output,
                "Project '{}' created with ID {}.",
                project.name(),
                project.id()
            ),
            Err(err) => self.report(&err),
        }
    }

    async fn list_projects(&mut self) -> io::Result<()> {
        match self.projects.list().await {
            Ok(projects) if projects.is_empty() => writeln!(self.output, "No projects found."),
            Ok(projects) => projects
                .iter()
                .try_for_each(|project| write_project(&mut self.output, project)),
            Err(err) => self.report(&err),
        }
    }

    async fn edit_project(&mut self) -> io::Result<()> {
        let Some(project_id) = self.prompt_project_id()? else {
            return Ok(());
        };
        let name = self.prompt_optional("New project name (leave blank to skip): ")?;
        let description = self.prompt_optional("New description (leave blank to skip): ")?;

        let mut request = UpdateProjectRequest::new(project_id);
        if let Some(text) = name {
            request = request.with_name(text);
        }
        if let Some(text) = description {
            request = request.with_description(text);
        }
        match self.projects.update(request).await {
            Ok(_) => writeln!(self.output, "Project updated successfully."),
            Err(err) => self.report(&err),
        }
    }

    async fn delete_project(&mut self) -> io::Result<()> {
        let Some(project_id) = self.prompt_project_id()? else {
            return Ok(());
        };
        match self.projects.delete(project_id).await {
            Ok(()) => writeln!(self.output, "Project deleted successfully."),
            Err(err) => self.report(&err),
        }
    }

    async fn add_task(&mut self) -> io::Result<()> {
        let Some(project_id) = self.prompt_project_id()? else {
            return Ok(());
        };
        let title = self.prompt("Task title: ")?.unwrap_or_default();
        let description = self.prompt_optional("Task description (optional): ")?;
        let deadline = self.prompt_optional("Deadline (YYYY-MM-DD, optional): ")?;

        let mut request = CreateTaskRequest::new(project_id, title);
        if let Some(text) = description {
            request = request.with_description(text);
        }
        if let Some(date) = deadline {
            request = request.with_deadline(date);
        }
        match self.tasks.create(request).await {
            Ok(task) => writeln!(
                self.output,
                "Task '{}' created with ID {}.",
                task.title(),
                task.id()
            ),
            Err(err) => self.report(&err),
        }
    }

    async fn list_tasks(&mut self) -> io::Result<()> {
        let Some(project_id) = self.prompt_project_id()? else {
            return Ok(());
        };
        match self.tasks.list(project_id).await {
            Ok(tasks) if tasks.is_empty() => {
                writeln!(self.output, "No tasks found for this project.")
            }
            Ok(tasks) => tasks
                .iter()
                .try_for_each(|task| write_task(&mut self.output, task)),
            Err(err) => self.report(&err),
        }
    }

    async fn edit_task(&mut self) -> io::Result<()> {
        let Some(task_id) = self.prompt_task_id()? else {
            return Ok(());
        };
        let title = self.prompt_optional("New title (leave blank to skip): ")?;
        let description = self.prompt_optional("New description (leave blank to skip): ")?;
        let status =
            self.prompt_optional("New status (todo/doing/done, leave blank to skip): ")?;
        let deadline =
            self.prompt_optional("New deadline (YYYY-MM-DD, leave blank to skip): ")?;

        let mut request = UpdateTaskRequest::new(task_id);
        if let Some(text) = title {
            request = request.with_title(text);
        }
        if let Some(text) = description {
            request = request.with_description(text);
        }
        if let Some(text) = status {
            request = request.with_status(text);
        }
        if let Some(text) = deadline {
            request = request.with_deadline(text);
        }
        match self.tasks.update(request).await {
            Ok(_) => writeln!(self.output, "Task updated successfully."),
            Err(err) => self.report(&err),
        }
    }

    async fn update_status(&mut self) -> io::Result<()> {
        let Some(task_id) = self.prompt_task_id()? else {
            return Ok(());
        };
        let status = self
            .prompt("New status (todo/doing/done): ")?
            .unwrap_or_default();
        match self.tasks.update_status(task_id, &status).await {
            Ok(task) => writeln!(self.output, "Task status set to {}.", task.status()),
            Err(err) => self.report(&err),
        }
    }

    async fn delete_task(&mut self) -> io::Result<()> {
        let Some(task_id) = self.prompt_task_id()? else {
            return Ok(());
        };
        match self.tasks.delete(task_id).await {
            Ok(()) => writeln!(self.output, "Task deleted successfully."),
            Err(err) => self.report(&err),
        }
    }

    /// Reads one trimmed answer; `None` once input is exhausted.
    fn prompt(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    fn prompt_optional(&mut self, question: &str) -> io::Result<Option<String>> {
        Ok(self.prompt(question)?.filter(|answer| !answer.is_empty()))
    }

    fn prompt_project_id(&mut self) -> io::Result<Option<ProjectId>> {
        let raw = self.prompt("Project ID: ")?.unwrap_or_default();
        match raw.parse::<ProjectId>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                writeln!(self.output, "Error: no project found with ID '{raw}'.")?;
                Ok(None)
            }
        }
    }

    fn prompt_task_id(&mut self) -> io::Result<Option<TaskId>> {
        let raw = self.prompt("Task ID: ")?.unwrap_or_default();
        match raw.parse::<TaskId>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                writeln!(self.output, "Error: no task found with ID '{raw}'.")?;
                Ok(None)
            }
        }
    }

    fn report(&mut self, err: &impl Display) -> io::Result<()> {
        writeln!(self.output, "Error: {err}")
    }
}

fn write_project(output: &mut impl Write, project: &Project) -> io::Result<()> {
    writeln!(output, "ID: {}", project.id())?;
    writeln!(output, "Name: {}", project.name())?;
    writeln!(output, "Description: {}", project.description())?;
    writeln!(output)
}

fn write_task(output: &mut impl Write, task: &Task) -> io::Result<()> {
    writeln!(output, "ID: {}", task.id())?;
    writeln!(output, "Title: {}", task.title())?;
    writeln!(output, "Description: {}", task.description())?;
    writeln!(output, "Status: {}", task.status())?;
    match task.deadline() {
        Some(deadline) => writeln!(output, "Deadline: {deadline}")?,
        None => writeln!(output, "Deadline: none")?,
    }
    writeln!(output)
}

#[cfg(test)]
mod tests;
