//! Firing times for the overdue sweep.

use chrono::{DateTime, Days, NaiveTime, Utc};
use std::time::Duration;
use thiserror::Error;

/// Default period between interval-driven sweeps (15 minutes).
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Default UTC time of the daily sweep (02:00).
pub const DEFAULT_DAILY_AT: NaiveTime = match NaiveTime::from_hms_opt(2, 0, 0) {
    Some(time) => time,
    None => NaiveTime::MIN,
};

/// When the sweep fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepSchedule {
    /// Period of the repeating sweep.
    pub interval: Duration,
    /// UTC wall-clock time of the daily sweep.
    pub daily_at: NaiveTime,
}

impl Default for SweepSchedule {
    fn default() -> Self {
        Self {
            interval: DEFAULT_SWEEP_INTERVAL,
            daily_at: DEFAULT_DAILY_AT,
        }
    }
}

impl SweepSchedule {
    /// Builds a schedule from an interval in minutes and a daily time.
    ///
    /// A zero interval is raised to one minute.
    #[must_use]
    pub fn new(interval_minutes: u64, daily_at: NaiveTime) -> Self {
        Self {
            interval: Duration::from_secs(interval_minutes.max(1).saturating_mul(60)),
            daily_at,
        }
    }
}

/// Error returned for a malformed `HH:MM` daily time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid daily sweep time '{0}', expected HH:MM")]
pub struct ParseDailyTimeError(pub String);

/// Parses an `HH:MM` time of day.
///
/// # Errors
///
/// Returns [`ParseDailyTimeError`] when the value is not a valid 24-hour
/// time.
pub fn parse_daily_time(value: &str) -> Result<NaiveTime, ParseDailyTimeError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| ParseDailyTimeError(value.to_owned()))
}

/// Returns the first instant strictly after `now` whose UTC time is `at`.
#[must_use]
pub fn next_daily_run(now: DateTime<Utc>, at: NaiveTime) -> DateTime<Utc> {
    let today = now.date_naive().and_time(at).and_utc();
    if today > now {
        return today;
    }
    today.checked_add_days(Days::new(1)).unwrap_or(today)
}
