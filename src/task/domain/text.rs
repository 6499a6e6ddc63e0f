//! Validated text values carried by a task.

use super::TaskDomainError;
use crate::validation::{MAX_DESCRIPTION_WORDS, MAX_HEADLINE_WORDS, words_over_limit};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trimmed, non-empty task title of at most 30 words.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the value is blank or
    /// [`TaskDomainError::TitleTooManyWords`] when it has more than 30 words.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        if let Some(count) = words_over_limit(normalized, MAX_HEADLINE_WORDS) {
            return Err(TaskDomainError::TitleTooManyWords {
                count,
                max: MAX_HEADLINE_WORDS,
            });
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task description of at most 150 words; may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Creates a validated description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DescriptionTooManyWords`] when the value has
    /// more than 150 words.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if let Some(count) = words_over_limit(normalized, MAX_DESCRIPTION_WORDS) {
            return Err(TaskDomainError::DescriptionTooManyWords {
                count,
                max: MAX_DESCRIPTION_WORDS,
            });
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
