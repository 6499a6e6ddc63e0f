//! Periodic closure of overdue tasks.
//!
//! [`OverdueSweep::run_once`] closes every task whose deadline is strictly
//! before the clock's current UTC date and whose status is not yet `done`.
//! [`OverdueSweep::run_on_schedule`] repeats that pass on a fixed interval
//! and once a day at a configured time until cancelled.

mod job;
mod schedule;

pub use job::{OverdueSweep, SweepReport};
pub use schedule::{
    DEFAULT_DAILY_AT, DEFAULT_SWEEP_INTERVAL, ParseDailyTimeError, SweepSchedule,
    next_daily_run, parse_daily_time,
};
