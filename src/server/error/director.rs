//! Director selection and registration errors with their HTTP status mapping.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Errors raised while managing or selecting corporation directors.
#[derive(Error, Debug)]
pub enum DirectorError {
    /// The corporation has never had a director registered.
    #[error("Corporation {0} has no directors configured, register one to enable ESI access")]
    NotConfigured(i64),
    /// Directors exist for the corporation but none of them are currently healthy.
    #[error("Corporation {0} has no healthy directors, verify or replace its directors")]
    NoHealthyCredentials(i64),
    /// Every healthy director was tried during a single operation and each one failed.
    #[error(
        "All {attempts} healthy director(s) of corporation {corporation_id} failed: {last_error}"
    )]
    AllCandidatesFailed {
        /// EVE Online corporation ID
        corporation_id: i64,
        /// Number of directors tried
        attempts: usize,
        /// Failure message of the final director tried
        last_error: String,
    },
    /// The character is already registered as a director of the corporation.
    #[error("Character {character_id} is already a director of corporation {corporation_id}")]
    DuplicateCredential {
        /// EVE Online corporation ID
        corporation_id: i64,
        /// EVE Online character ID
        character_id: i64,
    },
    /// The corporation does not exist in the database.
    #[error("Corporation {0} not found")]
    CorporationNotFound(i64),
    /// The character is not registered as a director of the corporation.
    #[error("Character {character_id} is not a director of corporation {corporation_id}")]
    DirectorNotFound {
        /// EVE Online corporation ID
        corporation_id: i64,
        /// EVE Online character ID
        character_id: i64,
    },
}

impl IntoResponse for DirectorError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotConfigured(_) | Self::NoHealthyCredentials(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::AllCandidatesFailed { .. } => StatusCode::BAD_GATEWAY,
            Self::DuplicateCredential { .. } => StatusCode::CONFLICT,
            Self::CorporationNotFound(_) | Self::DirectorNotFound { .. } => StatusCode::NOT_FOUND,
        };

        tracing::debug!("Director error ({}): {}", status, self);

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
