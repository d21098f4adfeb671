//! Error types for the Warden server application.
//!
//! Specialized error types exist for configuration and director selection failures. All errors
//! implement `IntoResponse` for Axum HTTP responses and use `thiserror` for their `Display` and
//! `Error` implementations.

pub mod config;
pub mod director;
/// Failures of authenticated ESI requests
pub mod esi;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{config::ConfigError, director::DirectorError},
};

/// Main error type for the Warden server application.
///
/// Aggregates domain-specific errors and external library errors into a single type with
/// `#[from]` conversions so the `?` operator works across layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Director selection, failover or registration error.
    #[error(transparent)]
    DirectorError(#[from] DirectorError),
    /// Parse error (failed to parse or encode a value).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// ESI client error (public ESI requests).
    #[error(transparent)]
    EsiError(#[from] eve_esi::Error),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
    /// IO error (binding the HTTP listener).
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Converts application errors into HTTP responses.
///
/// Director errors carry their own status mapping, everything else is a logged 500.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::DirectorError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic message to the client to avoid leaking
/// implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
