//! The overdue sweep job.

use super::schedule::{SweepSchedule, next_daily_run};
use crate::task::{
    domain::TaskId,
    ports::{TaskRepository, TaskRepositoryResult},
};
use mockable::Clock;
use std::sync::Arc;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Outcome of a single sweep pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Overdue tasks found.
    pub examined: usize,
    /// Tasks moved to `done` and persisted.
    pub closed: usize,
    /// Tasks edited after the query so that they were no longer overdue.
    pub skipped: usize,
    /// Tasks whose update could not be persisted.
    pub failed: Vec<TaskId>,
}

/// Closes overdue tasks.
pub struct OverdueSweep<T, C>
where
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<T, C> Clone for OverdueSweep<T, C>
where
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<T, C> OverdueSweep<T, C>
where
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a sweep over the given task repository.
    #[must_use]
    pub const fn new(tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self { tasks, clock }
    }

    /// Runs one pass.
    ///
    /// Each task is closed with a conditional write that re-checks the
    /// overdue predicate, so an edit landing between the query and the write
    /// wins and the task is counted in [`SweepReport::skipped`]. A task whose
    /// write fails is logged and recorded in [`SweepReport::failed`]; the pass
    /// continues with the next task.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the overdue query itself fails.
    pub async fn run_once(&self) -> TaskRepositoryResult<SweepReport> {
        let today = self.clock.utc().date_naive();
        let overdue = self.tasks.list_overdue(today).await?;

        let mut report = SweepReport {
            examined: overdue.len(),
            ..SweepReport::default()
        };

        for task in overdue {
            let task_id = task.id();
            match self
                .tasks
                .close_if_overdue(task_id, today, self.clock.utc())
                .await
            {
                Ok(true) => report.closed = report.closed.saturating_add(1),
                Ok(false) => {
                    debug!(%task_id, "task changed since the overdue query, left open");
                    report.skipped = report.skipped.saturating_add(1);
                }
                Err(err) => {
                    warn!(%task_id, error = %err, "failed to close overdue task");
                    report.failed.push(task_id);
                }
            }
        }

        info!(
            %today,
            examined = report.examined,
            closed = report.closed,
            skipped = report.skipped,
            failed = report.failed.len(),
            "overdue sweep finished"
        );
        Ok(report)
    }

    /// Runs passes on `schedule` until `cancel` fires.
    ///
    /// The interval timer's first tick is one period after start. A failed
    /// pass is logged and the loop keeps going.
    pub async fn run_on_schedule(self, schedule: SweepSchedule, cancel: CancellationToken) {
        let mut interval =
            tokio::time::interval_at(Instant::now() + schedule.interval, schedule.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(
            interval_secs = schedule.interval.as_secs(),
            daily_at = %schedule.daily_at,
            "overdue sweep scheduled"
        );

        loop {
            let until_daily = self.until_next_daily(&schedule);
            tokio::select! {
                () = cancel.cancelled() => {
                    info!("overdue sweep stopped");
                    break;
                }
                _ = interval.tick() => self.run_logged("interval").await,
                () = tokio::time::sleep(until_daily) => self.run_logged("daily").await,
            }
        }
    }

    fn until_next_daily(&self, schedule: &SweepSchedule) -> std::time::Duration {
        let now = self.clock.utc();
        (next_daily_run(now, schedule.daily_at) - now)
            .to_std()
            .unwrap_or_default()
    }

    async fn run_logged(&self, trigger: &'static str) {
        if let Err(err) = self.run_once().await {
            warn!(trigger, error = %err, "overdue sweep failed");
        }
    }
}
