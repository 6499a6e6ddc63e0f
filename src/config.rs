//! Runtime settings read from flags and environment variables.
//!
//! Every setting has a flag, an environment variable and a default, in that
//! order of precedence. The legacy `MAX_NUMBER_OF_PROJECT` and
//! `MAX_NUMBER_OF_TASK` variable names are kept for existing deployments.

use crate::project::domain::{DEFAULT_MAX_PROJECTS, DescriptionPolicy, ProjectLimits};
use crate::sweep::{SweepSchedule, parse_daily_time};
use crate::task::domain::{DEFAULT_MAX_TASKS_PER_PROJECT, TaskLimits};
use chrono::NaiveTime;
use clap::Args;
use std::net::SocketAddr;

/// Default listen address of the HTTP API.
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct Settings {
    /// Maximum number of live projects.
    #[arg(
        long = "max-projects",
        env = "MAX_NUMBER_OF_PROJECT",
        default_value_t = DEFAULT_MAX_PROJECTS,
        global = true
    )]
    pub max_projects: usize,

    /// Maximum number of tasks per project.
    #[arg(
        long = "max-tasks-per-project",
        env = "MAX_NUMBER_OF_TASK",
        default_value_t = DEFAULT_MAX_TASKS_PER_PROJECT,
        global = true
    )]
    pub max_tasks_per_project: usize,

    /// Require project descriptions of at least 30 words and 150 characters.
    #[arg(long, env = "TASKBOARD_DETAILED_DESCRIPTIONS", global = true)]
    pub detailed_descriptions: bool,

    /// PostgreSQL connection URL; the in-memory store is used when unset.
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    /// Connections kept in the PostgreSQL pool.
    #[arg(long, env = "TASKBOARD_POOL_SIZE", default_value_t = 8, global = true)]
    pub pool_size: u32,

    /// Address the HTTP API listens on.
    #[arg(long, env = "TASKBOARD_BIND", default_value = DEFAULT_BIND, global = true)]
    pub bind: SocketAddr,

    /// Minutes between interval-driven overdue sweeps.
    #[arg(long, env = "SWEEP_INTERVAL_MINUTES", default_value_t = 15, global = true)]
    pub sweep_interval_minutes: u64,

    /// UTC time of the daily overdue sweep, as `HH:MM`.
    #[arg(
        long,
        env = "SWEEP_DAILY_AT",
        default_value = "02:00",
        value_parser = parse_daily_time,
        global = true
    )]
    pub sweep_daily_at: NaiveTime,
}

impl Settings {
    /// Project limits derived from the settings.
    #[must_use]
    pub fn project_limits(&self) -> ProjectLimits {
        let policy = if self.detailed_descriptions {
            DescriptionPolicy::detailed()
        } else {
            DescriptionPolicy::CeilingOnly
        };
        ProjectLimits::with_max_projects(self.max_projects).with_description_policy(policy)
    }

    /// Task limits derived from the settings.
    #[must_use]
    pub const fn task_limits(&self) -> TaskLimits {
        TaskLimits::new(self.max_tasks_per_project)
    }

    /// Sweep schedule derived from the settings.
    #[must_use]
    pub fn sweep_schedule(&self) -> SweepSchedule {
        SweepSchedule::new(self.sweep_interval_minutes, self.sweep_daily_at)
    }
}
