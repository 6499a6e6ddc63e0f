//! Command-line entry point for taskboard.
//!
//! Usage:
//!
//! ```text
//! taskboard [OPTIONS] [serve [--no-sweep] | sweep [--once] | console]
//! ```
//!
//! `serve` is the default. The store is `PostgreSQL` when `DATABASE_URL` is
//! set and an in-memory arena otherwise.

use clap::{Parser, Subcommand};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use taskboard::config::Settings;
use taskboard::console::Console;
use taskboard::http::{self, AppState};
use taskboard::project::{ports::ProjectRepository, services::ProjectLifecycleService};
use taskboard::store::InMemoryStore;
use taskboard::store::postgres::{self, PostgresProjectRepository, PostgresTaskRepository};
use taskboard::sweep::OverdueSweep;
use taskboard::task::{ports::TaskRepository, services::TaskLifecycleService};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Taskboard: projects, tasks and an overdue sweep.
#[derive(Debug, Parser)]
#[command(name = "taskboard", version, about)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
    /// Serve the JSON API.
    Serve {
        /// Do not run the overdue sweep inside the server.
        #[arg(long)]
        no_sweep: bool,
    },

    /// Close overdue tasks, on schedule or once.
    Sweep {
        /// Run a single pass and exit.
        #[arg(long)]
        once: bool,
    },

    /// Start the deprecated interactive console.
    Console,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    taskboard::telemetry::init();
    let cli = Cli::parse();

    if let Some(url) = cli.settings.database_url.as_deref() {
        let pool = postgres::connect(url, cli.settings.pool_size)?;
        postgres::apply_schema(&pool).await?;
        info!("using the PostgreSQL store");
        let projects = Arc::new(PostgresProjectRepository::new(pool.clone()));
        let tasks = Arc::new(PostgresTaskRepository::new(pool));
        run(cli, projects, tasks).await
    } else {
        info!("DATABASE_URL is unset, using the in-memory store");
        let store = Arc::new(InMemoryStore::new());
        run(cli, Arc::clone(&store), store).await
    }
}

async fn run<P, T>(cli: Cli, projects: Arc<P>, tasks: Arc<T>) -> Result<(), BoxError>
where
    P: ProjectRepository + 'static,
    T: TaskRepository + 'static,
{
    let Cli { settings, command } = cli;
    let clock = Arc::new(DefaultClock);
    let project_service = ProjectLifecycleService::new(
        Arc::clone(&projects),
        Arc::clone(&clock),
        settings.project_limits(),
    );
    let task_service = TaskLifecycleService::new(
        Arc::clone(&tasks),
        projects,
        Arc::clone(&clock),
        settings.task_limits(),
    );
    let sweep = OverdueSweep::new(tasks, clock);

    match command.unwrap_or(Command::Serve { no_sweep: false }) {
        Command::Serve { no_sweep } => {
            let state = AppState::new(project_service, task_service);
            serve(&settings, state, (!no_sweep).then_some(sweep)).await
        }
        Command::Sweep { once: true } => {
            sweep.run_once().await?;
            Ok(())
        }
        Command::Sweep { once: false } => {
            sweep
                .run_on_schedule(settings.sweep_schedule(), shutdown_token())
                .await;
            Ok(())
        }
        Command::Console => {
            let console = Console::new(
                project_service,
                task_service,
                std::io::stdin().lock(),
                std::io::stdout(),
            );
            console.run().await?;
            Ok(())
        }
    }
}

async fn serve<P, T, C>(
    settings: &Settings,
    state: AppState<P, T, C>,
    sweep: Option<OverdueSweep<T, C>>,
) -> Result<(), BoxError>
where
    P: ProjectRepository + 'static,
    T: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let shutdown = shutdown_token();
    let sweep_task = sweep.map(|job| {
        tokio::spawn(job.run_on_schedule(settings.sweep_schedule(), shutdown.child_token()))
    });

    let listener = TcpListener::bind(settings.bind).await?;
    http::serve(listener, http::router(state), shutdown.clone()).await?;

    shutdown.cancel();
    if let Some(handle) = sweep_task {
        handle.await?;
    }
    info!("taskboard stopped");
    Ok(())
}

/// Returns a token cancelled on Ctrl-C.
fn shutdown_token() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("shutdown requested");
                trigger.cancel();
            }
            Err(err) => warn!(error = %err, "cannot listen for Ctrl-C"),
        }
    });
    token
}
