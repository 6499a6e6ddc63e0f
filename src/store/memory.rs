//! In-memory store for tests and database-less deployments.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::project::{
    domain::{Project, ProjectId, ProjectName},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory arena holding projects and their tasks.
///
/// Tasks live in a flat map keyed by [`TaskId`]; each project entry keeps the
/// ordered list of the task ids it owns. Cloning the store shares the arena.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<InMemoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    projects: HashMap<ProjectId, ProjectEntry>,
    project_order: Vec<ProjectId>,
    name_index: HashMap<ProjectName, ProjectId>,
    tasks: HashMap<TaskId, Task>,
}

#[derive(Debug)]
struct ProjectEntry {
    project: Project,
    task_ids: Vec<TaskId>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, InMemoryState>, std::io::Error> {
        self.state
            .read()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, InMemoryState>, std::io::Error> {
        self.state
            .write()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }
}

impl InMemoryState {
    fn insert_project(&mut self, project: &Project) -> ProjectRepositoryResult<()> {
        if self.projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }
        if self.name_index.contains_key(project.name()) {
            return Err(ProjectRepositoryError::DuplicateName(
                project.name().clone(),
            ));
        }

        self.name_index.insert(project.name().clone(), project.id());
        self.project_order.push(project.id());
        self.projects.insert(
            project.id(),
            ProjectEntry {
                project: project.clone(),
                task_ids: Vec::new(),
            },
        );
        Ok(())
    }

    fn insert_task(&mut self, task: &Task) -> TaskRepositoryResult<()> {
        if self.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }

        let entry = self
            .projects
            .get_mut(&task.project_id())
            .ok_or(TaskRepositoryError::ProjectNotFound(task.project_id()))?;
        entry.task_ids.push(task.id());
        self.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    fn tasks_of(&self, project_id: ProjectId) -> Vec<Task> {
        self.projects
            .get(&project_id)
            .map(|entry| {
                entry
                    .task_ids
                    .iter()
                    .filter_map(|id| self.tasks.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.write().map_err(ProjectRepositoryError::persistence)?;
        state.insert_project(project)
    }

    async fn store_within_limit(
        &self,
        project: &Project,
        max_projects: usize,
    ) -> ProjectRepositoryResult<()> {
        let mut state = self.write().map_err(ProjectRepositoryError::persistence)?;
        if state.projects.len() >= max_projects {
            return Err(ProjectRepositoryError::LimitReached { max: max_projects });
        }
        state.insert_project(project)
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.write().map_err(ProjectRepositoryError::persistence)?;

        let old_name = state
            .projects
            .get(&project.id())
            .ok_or(ProjectRepositoryError::NotFound(project.id()))?
            .project
            .name()
            .clone();

        if let Some(owner) = state.name_index.get(project.name())
            && *owner != project.id()
        {
            return Err(ProjectRepositoryError::DuplicateName(
                project.name().clone(),
            ));
        }

        state.name_index.remove(&old_name);
        state
            .name_index
            .insert(project.name().clone(), project.id());
        if let Some(entry) = state.projects.get_mut(&project.id()) {
            entry.project = project.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        let mut state = self.write().map_err(ProjectRepositoryError::persistence)?;
        let entry = state
            .projects
            .remove(&id)
            .ok_or(ProjectRepositoryError::NotFound(id))?;

        state.name_index.remove(entry.project.name());
        state.project_order.retain(|project_id| *project_id != id);
        for task_id in &entry.task_ids {
            state.tasks.remove(task_id);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.read().map_err(ProjectRepositoryError::persistence)?;
        Ok(state.projects.get(&id).map(|entry| entry.project.clone()))
    }

    async fn find_by_name(&self, name: &ProjectName) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.read().map_err(ProjectRepositoryError::persistence)?;
        let project = state
            .name_index
            .get(name)
            .and_then(|id| state.projects.get(id))
            .map(|entry| entry.project.clone());
        Ok(project)
    }

    async fn list(&self) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.read().map_err(ProjectRepositoryError::persistence)?;
        Ok(state
            .project_order
            .iter()
            .filter_map(|id| state.projects.get(id))
            .map(|entry| entry.project.clone())
            .collect())
    }

    async fn count(&self) -> ProjectRepositoryResult<usize> {
        let state = self.read().map_err(ProjectRepositoryError::persistence)?;
        Ok(state.projects.len())
    }
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        state.insert_task(task)
    }

    async fn store_within_limit(
        &self,
        task: &Task,
        max_per_project: usize,
    ) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        let project_id = task.project_id();
        let owned = state
            .projects
            .get(&project_id)
            .ok_or(TaskRepositoryError::ProjectNotFound(project_id))?
            .task_ids
            .len();
        if owned >= max_per_project {
            return Err(TaskRepositoryError::LimitReached {
                project_id,
                max: max_per_project,
            });
        }
        state.insert_task(task)
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        let slot = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *slot = task.clone();
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        let task = state
            .tasks
            .remove(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        if let Some(entry) = state.projects.get_mut(&task.project_id()) {
            entry.task_ids.retain(|task_id| *task_id != id);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state.tasks_of(project_id))
    }

    async fn count_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state
            .projects
            .get(&project_id)
            .map_or(0, |entry| entry.task_ids.len()))
    }

    async fn list_overdue(&self, today: NaiveDate) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state
            .project_order
            .iter()
            .flat_map(|project_id| state.tasks_of(*project_id))
            .filter(|task| task.is_overdue(today))
            .collect())
    }

    async fn close_if_overdue(
        &self,
        id: TaskId,
        today: NaiveDate,
        closed_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<bool> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        Ok(state
            .tasks
            .get_mut(&id)
            .is_some_and(|task| task.close_if_overdue(today, closed_at)))
    }
}
