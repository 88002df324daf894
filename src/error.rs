//! Custom error types and handling
//!
//! This module defines the application's error types and implements
//! conversion to HTTP responses for the Axum framework. Client-visible
//! errors map to 400; everything else is an internal fault mapped to 500
//! without leaking backend error text to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application-wide error type returned by the `/submit` handler.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("malformed request payload")]
    MalformedPayload,

    #[error("missing code field")]
    MissingCode,

    #[error("unsupported language: {0}")]
    UnknownLanguage(String),

    #[error("unknown problem: {0}")]
    UnknownProblem(String),

    #[error("invalid base64 in code field")]
    InvalidBase64,

    #[error("sandbox backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("sandbox launch failed: {0}")]
    SandboxLaunchFailed(String),

    #[error("staging I/O error: {0}")]
    StagingIoError(String),

    #[error("runner internal error: {0}")]
    RunnerInternal(String),

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Error details in response
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

impl AppError {
    /// Machine-readable error code for this error variant
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedPayload => "MALFORMED_PAYLOAD",
            Self::MissingCode => "MISSING_CODE",
            Self::UnknownLanguage(_) => "UNKNOWN_LANGUAGE",
            Self::UnknownProblem(_) => "UNKNOWN_PROBLEM",
            Self::InvalidBase64 => "INVALID_BASE64",
            Self::BackendUnavailable(_) => "BACKEND_UNAVAILABLE",
            Self::SandboxLaunchFailed(_) => "SANDBOX_LAUNCH_FAILED",
            Self::StagingIoError(_) => "STAGING_IO_ERROR",
            Self::RunnerInternal(_) => "RUNNER_INTERNAL",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedPayload
            | Self::MissingCode
            | Self::UnknownLanguage(_)
            | Self::UnknownProblem(_)
            | Self::InvalidBase64 => StatusCode::BAD_REQUEST,
            Self::BackendUnavailable(_)
            | Self::SandboxLaunchFailed(_)
            | Self::StagingIoError(_)
            | Self::RunnerInternal(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this error is client-visible (400) as opposed to an internal
    /// fault (500) whose details should never reach the caller.
    pub fn is_client_error(&self) -> bool {
        self.status_code() == StatusCode::BAD_REQUEST
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if self.is_client_error() {
            self.to_string()
        } else {
            tracing::error!("internal error: {:?}", self);
            "An internal error occurred".to_string()
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.error_code().to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
