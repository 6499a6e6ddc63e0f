//! Calendar-date deadlines.

use super::TaskDomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire and storage format of a deadline.
const DEADLINE_FORMAT: &str = "%Y-%m-%d";

/// Calendar date by which a task should be finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deadline(NaiveDate);

impl Deadline {
    /// Parses a `YYYY-MM-DD` deadline.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDeadline`] when the value is not a
    /// real calendar date (for example `2024-02-30`).
    pub fn parse(value: &str) -> Result<Self, TaskDomainError> {
        NaiveDate::parse_from_str(value.trim(), DEADLINE_FORMAT)
            .map(Self)
            .map_err(|_| TaskDomainError::InvalidDeadline(value.to_owned()))
    }

    /// Wraps an already valid date.
    #[must_use]
    pub const fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the wrapped date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// Returns `true` when the deadline lies strictly before `today`.
    #[must_use]
    pub fn has_passed(self, today: NaiveDate) -> bool {
        self.0 < today
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DEADLINE_FORMAT))
    }
}
