//! Aggregate limits and description policy for projects.

use super::ProjectDomainError;

/// Default cap on the number of live projects.
pub const DEFAULT_MAX_PROJECTS: usize = 5;

/// Word and character minimums of [`DescriptionPolicy::detailed`].
const DETAILED_MIN_WORDS: usize = 30;
const DETAILED_MIN_CHARS: usize = 150;

/// Minimum-length rule applied to project descriptions.
///
/// The word ceiling always applies. [`DescriptionPolicy::CeilingOnly`] adds
/// nothing on top of it; [`DescriptionPolicy::Detailed`] also rejects
/// descriptions that are too short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DescriptionPolicy {
    /// Only the word ceiling applies.
    #[default]
    CeilingOnly,
    /// Descriptions must reach both minimums.
    Detailed {
        /// Minimum number of words.
        min_words: usize,
        /// Minimum number of characters after trimming.
        min_chars: usize,
    },
}

impl DescriptionPolicy {
    /// Returns the detailed policy: at least 30 words and 150 characters.
    #[must_use]
    pub const fn detailed() -> Self {
        Self::Detailed {
            min_words: DETAILED_MIN_WORDS,
            min_chars: DETAILED_MIN_CHARS,
        }
    }
}

/// Limits enforced when creating and editing projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectLimits {
    /// Maximum number of live projects.
    pub max_projects: usize,
    /// Minimum-length rule for descriptions.
    pub description_policy: DescriptionPolicy,
}

impl Default for ProjectLimits {
    fn default() -> Self {
        Self {
            max_projects: DEFAULT_MAX_PROJECTS,
            description_policy: DescriptionPolicy::CeilingOnly,
        }
    }
}

impl ProjectLimits {
    /// Creates limits with the given project cap and the default policy.
    #[must_use]
    pub fn with_max_projects(max_projects: usize) -> Self {
        Self {
            max_projects,
            ..Self::default()
        }
    }

    /// Replaces the description policy.
    #[must_use]
    pub const fn with_description_policy(mut self, policy: DescriptionPolicy) -> Self {
        self.description_policy = policy;
        self
    }

    /// Checks that one more project fits next to `current_count` live ones.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::ProjectLimitReached`] when the cap has
    /// already been reached.
    pub const fn ensure_capacity(&self, current_count: usize) -> Result<(), ProjectDomainError> {
        if current_count >= self.max_projects {
            return Err(ProjectDomainError::ProjectLimitReached {
                max: self.max_projects,
            });
        }
        Ok(())
    }
}
