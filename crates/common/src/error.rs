//! Common error types and handling for the media studio core

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Stable, machine-checkable identity of a failure: a module plus a kind
/// within that module. Message text may change; the code does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ErrorCode {
    pub module: &'static str,
    pub kind: &'static str,
}

impl ErrorCode {
    pub const fn new(module: &'static str, kind: &'static str) -> Self {
        Self { module, kind }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.module, self.kind)
    }
}

/// Common error type for the media studio core
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not found: {message}")]
    NotFound { code: ErrorCode, message: String },

    #[error("Upstream error: {message}")]
    Upstream { code: ErrorCode, message: String },

    #[error("Internal error: {message}")]
    Internal { code: ErrorCode, message: String },
}

impl Error {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Upstream { .. } => StatusCode::BAD_GATEWAY,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error category for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::NotFound { .. } => "NOT_FOUND",
            Error::Upstream { .. } => "UPSTREAM_ERROR",
            Error::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Module/kind identity of the failure
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::NotFound { code, .. }
            | Error::Upstream { code, .. }
            | Error::Internal { code, .. } => *code,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let code = self.code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Internal server error");
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "module": code.module,
                "kind": code.kind,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}
