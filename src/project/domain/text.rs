//! Validated text values carried by a project.

use super::{DescriptionPolicy, ProjectDomainError};
use crate::validation::{MAX_DESCRIPTION_WORDS, MAX_HEADLINE_WORDS, word_count, words_over_limit};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a project name, matching the `VARCHAR(100)` column.
const MAX_NAME_CHARS: usize = 100;

/// Trimmed, non-empty project name.
///
/// Names are compared exactly after trimming when enforcing uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Creates a validated project name.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyName`] when the value is blank,
    /// [`ProjectDomainError::NameTooManyWords`] when it has more than 30
    /// words, or [`ProjectDomainError::NameTooLong`] when it exceeds 100
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.is_empty() {
            return Err(ProjectDomainError::EmptyName);
        }
        if let Some(count) = words_over_limit(normalized, MAX_HEADLINE_WORDS) {
            return Err(ProjectDomainError::NameTooManyWords {
                count,
                max: MAX_HEADLINE_WORDS,
            });
        }
        if normalized.chars().count() > MAX_NAME_CHARS {
            return Err(ProjectDomainError::NameTooLong {
                max: MAX_NAME_CHARS,
            });
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Project description within the word ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectDescription(String);

impl ProjectDescription {
    /// Creates a validated description under `policy`.
    ///
    /// Surrounding whitespace is trimmed; an empty description is accepted
    /// unless the policy sets a minimum.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::DescriptionTooManyWords`] when the value
    /// has more than 150 words, or [`ProjectDomainError::DescriptionTooShort`]
    /// when a detailed policy is active and either minimum is missed.
    pub fn new(
        value: impl Into<String>,
        policy: DescriptionPolicy,
    ) -> Result<Self, ProjectDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if let Some(count) = words_over_limit(normalized, MAX_DESCRIPTION_WORDS) {
            return Err(ProjectDomainError::DescriptionTooManyWords {
                count,
                max: MAX_DESCRIPTION_WORDS,
            });
        }
        if let DescriptionPolicy::Detailed {
            min_words,
            min_chars,
        } = policy
        {
            let too_short =
                word_count(normalized) < min_words || normalized.chars().count() < min_chars;
            if too_short {
                return Err(ProjectDomainError::DescriptionTooShort {
                    min_words,
                    min_chars,
                });
            }
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when no description was given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for ProjectDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
