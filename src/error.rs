//! Unified error types for the clinic server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::clinic::{FormKind, Reply};

/// Unified error type for the clinic server.
#[derive(Error, Debug)]
pub enum ClinicError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration present but unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON encoding error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Timestamp formatting error.
    #[error("time format error: {0}")]
    TimeFormat(#[from] time::error::Format),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced to HTTP callers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A submitted form lacks one or more required fields.
    #[error("Please fill in all required fields")]
    Validation {
        /// Which form was submitted.
        form: FormKind,
        /// Names of the missing fields.
        missing: Vec<&'static str>,
    },

    /// Anything else that went wrong while handling a form.
    #[error("{} (cause: {source})", .form.failure_message())]
    Unexpected {
        /// Which form was being handled.
        form: FormKind,
        /// Underlying failure, logged but never sent to the caller.
        source: ClinicError,
    },

    /// A JSON or urlencoded body that could not be decoded.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// A failure outside of the form handlers.
    #[error("internal error: {0}")]
    Internal(#[from] ClinicError),

    /// No route matched.
    #[error("Endpoint not found")]
    NotFound,
}

impl ApiError {
    /// HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unexpected { .. } | ApiError::MalformedBody(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message placed in the JSON body.
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "Please fill in all required fields",
            ApiError::Unexpected { form, .. } => form.failure_message(),
            ApiError::MalformedBody(_) | ApiError::Internal(_) => GENERIC_FAILURE,
            ApiError::NotFound => "Endpoint not found",
        }
    }
}

/// Body of every 500 not attributable to a specific form.
pub const GENERIC_FAILURE: &str = "Something went wrong!";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        (status, Json(Reply::failure(self.public_message()))).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ClinicError>;
