//! Numbered menu entries.

/// An entry of the console main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Create a new project.
    CreateProject,
    /// Show all projects.
    ListProjects,
    /// Add a task to a project.
    AddTask,
    /// Show the tasks of a project.
    ListTasks,
    /// Edit a task.
    EditTask,
    /// Update a task's status.
    UpdateStatus,
    /// Delete a task.
    DeleteTask,
    /// Edit a project.
    EditProject,
    /// Delete a project.
    DeleteProject,
    /// Leave the console.
    Exit,
}

impl MenuChoice {
    /// All entries in display order.
    pub const ALL: [Self; 10] = [
        Self::CreateProject,
        Self::ListProjects,
        Self::AddTask,
        Self::ListTasks,
        Self::EditTask,
        Self::UpdateStatus,
        Self::DeleteTask,
        Self::EditProject,
        Self::DeleteProject,
        Self::Exit,
    ];

    /// Number typed to select the entry.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::CreateProject => 1,
            Self::ListProjects => 2,
            Self::AddTask => 3,
            Self::ListTasks => 4,
            Self::EditTask => 5,
            Self::UpdateStatus => 6,
            Self::DeleteTask => 7,
            Self::EditProject => 8,
            Self::DeleteProject => 9,
            Self::Exit => 10,
        }
    }

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreateProject => "Create a new project",
            Self::ListProjects => "Show all projects",
            Self::AddTask => "Add a task to a project",
            Self::ListTasks => "Show tasks of a project",
            Self::EditTask => "Edit a task",
            Self::UpdateStatus => "Update task status",
            Self::DeleteTask => "Delete a task",
            Self::EditProject => "Edit a project",
            Self::DeleteProject => "Delete a project",
            Self::Exit => "Exit",
        }
    }

    /// Parses a typed answer such as `" 3 "`.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let number = input.trim().parse::<u8>().ok()?;
        Self::ALL.into_iter().find(|choice| choice.number() == number)
    }
}
