//! Configuration loading errors.
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::error::InternalServerError;

/// Errors raised while loading configuration from the environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// An environment variable is set to a value that can't be used.
    #[error("Invalid value for environment variable {var}: {reason}")]
    InvalidEnvValue {
        /// Name of the environment variable
        var: String,
        /// Why the value was rejected
        reason: String,
    },
}

impl IntoResponse for ConfigError {
    fn into_response(self) -> Response {
        InternalServerError(self).into_response()
    }
}
