//! Mapping of service failures onto HTTP responses.

use super::dto::ErrorBody;
use crate::error::ErrorKind;
use crate::project::services::ProjectServiceError;
use crate::task::services::TaskLifecycleError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Error returned by every API handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    kind: ErrorKind,
    detail: String,
}

impl ApiError {
    /// Creates an error of the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Reports that `what` named by `raw_id` does not exist.
    #[must_use]
    pub fn not_found(what: &str, raw_id: &str) -> Self {
        Self::new(ErrorKind::NotFound, format!("{what} not found: {raw_id}"))
    }

    /// Failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self.kind {
            ErrorKind::Validation | ErrorKind::LimitExceeded | ErrorKind::DuplicateName => {
                StatusCode::BAD_REQUEST
            }
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Persistence => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ProjectServiceError> for ApiError {
    fn from(err: ProjectServiceError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

impl From<TaskLifecycleError> for ApiError {
    fn from(err: TaskLifecycleError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(ErrorKind::Validation, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(detail = %self.detail, "request failed");
        }
        let body = ErrorBody {
            error: self.kind,
            detail: self.detail,
        };
        (status, Json(body)).into_response()
    }
}
