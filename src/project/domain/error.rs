//! Error types for project domain validation.

use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned while constructing or mutating project values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyName,

    /// The project name has more words than allowed.
    #[error("project name has {count} words, at most {max} are allowed")]
    NameTooManyWords {
        /// Words found in the name.
        count: usize,
        /// Configured ceiling.
        max: usize,
    },

    /// The project name exceeds the storage column width.
    #[error("project name exceeds {max} characters")]
    NameTooLong {
        /// Maximum number of characters.
        max: usize,
    },

    /// The project description has more words than allowed.
    #[error("project description has {count} words, at most {max} are allowed")]
    DescriptionTooManyWords {
        /// Words found in the description.
        count: usize,
        /// Configured ceiling.
        max: usize,
    },

    /// The project description is shorter than the detailed policy requires.
    #[error(
        "project description must have at least {min_words} words and {min_chars} characters"
    )]
    DescriptionTooShort {
        /// Required number of words.
        min_words: usize,
        /// Required number of characters.
        min_chars: usize,
    },

    /// The configured number of projects already exists.
    #[error("cannot create more than {max} projects")]
    ProjectLimitReached {
        /// Configured project cap.
        max: usize,
    },
}

impl ProjectDomainError {
    /// Classifies the error for boundary adapters.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ProjectLimitReached { .. } => ErrorKind::LimitExceeded,
            _ => ErrorKind::Validation,
        }
    }
}
