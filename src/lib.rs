//! Taskboard: project and task management.
//!
//! Projects are uniquely named containers of tasks; tasks carry a status and
//! an optional deadline. The crate enforces field rules and aggregate caps,
//! exposes the operations over a JSON API and a deprecated console, and
//! closes overdue tasks on a schedule.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: validated values and entities with no infrastructure
//!   dependencies
//! - **Ports**: repository traits the services depend on
//! - **Adapters**: the in-memory and `PostgreSQL` stores, the HTTP router,
//!   the console and the sweep
//!
//! # Modules
//!
//! - [`project`]: project naming, description policy and lifecycle
//! - [`task`]: task fields, status, deadlines and lifecycle
//! - [`store`]: repository implementations shared by both contexts
//! - [`sweep`]: periodic closure of overdue tasks
//! - [`http`]: axum router over the services
//! - [`console`]: menu-driven front-end
//! - [`config`], [`telemetry`], [`error`]: settings, logging and error kinds

pub mod config;
pub mod console;
pub mod error;
pub mod http;
pub mod project;
pub mod store;
pub mod sweep;
pub mod task;
pub mod telemetry;
pub mod validation;
