//! Diesel schema for project and task persistence.

diesel::table! {
    /// Project records.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Unique project name.
        #[max_length = 100]
        name -> Varchar,
        /// Free-text description.
        description -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task records owned by a project.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning project, deleted in cascade.
        project_id -> Uuid,
        /// Task title.
        title -> Text,
        /// Free-text description.
        description -> Text,
        /// Status: `todo`, `doing` or `done`.
        #[max_length = 16]
        status -> Varchar,
        /// Optional deadline.
        deadline -> Nullable<Date>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> projects (project_id));
diesel::allow_tables_to_appear_in_same_query!(projects, tasks);
