//! Error types for Gatehouse
//!
//! Handler-facing failures are converted to `AppError`, which implements
//! `IntoResponse`. Browser-facing errors are always ordinary plain-text
//! pages: a misbehaving backend must never turn into a server fault.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::backend::BackendError;

/// Application-wide error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error (fatal at startup)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend auth service could not be reached or answered garbage
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl AppError {
    fn error_type(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::Backend(BackendError::Timeout) => "backend_timeout",
            AppError::Backend(BackendError::Transport(_)) => "backend_transport",
            AppError::Backend(BackendError::Malformed(_)) => "backend_malformed",
            AppError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for AppError {
    /// Convert error to a plain-text page
    ///
    /// The cause is logged and counted; the browser only ever sees a
    /// generic message with a 200 status.
    fn into_response(self) -> Response {
        let error_type = self.error_type();
        tracing::error!(error = %self, error_type, "Request failed");

        use crate::metrics::ERRORS_TOTAL;
        ERRORS_TOTAL.with_label_values(&[error_type]).inc();

        (StatusCode::OK, "Internal server error").into_response()
    }
}
