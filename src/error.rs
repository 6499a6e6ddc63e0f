//! Error classification shared by the boundary adapters.
//!
//! Each service error reports an [`ErrorKind`] so the HTTP layer, the console
//! and the sweep can react to failures without matching on every variant.

use serde::Serialize;
use std::fmt;

/// Category of a service-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A field constraint was violated.
    Validation,
    /// A project or task cap has been reached.
    LimitExceeded,
    /// The referenced project or task does not exist.
    NotFound,
    /// Another live project already uses the requested name.
    DuplicateName,
    /// The store failed to complete the operation.
    Persistence,
}

impl ErrorKind {
    /// Returns the wire representation used in error payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::LimitExceeded => "limit_exceeded",
            Self::NotFound => "not_found",
            Self::DuplicateName => "duplicate_name",
            Self::Persistence => "persistence",
        }
    }

    /// Returns `true` when the caller can fix the request and retry.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        !matches!(self, Self::Persistence)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
