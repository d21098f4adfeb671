//! Director management endpoints under `/api/corporations/{corporation_id}/directors`.
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        director::{AddDirectorDto, DirectorDto, UpdatePriorityDto, VerificationSummaryDto},
    },
    server::{
        error::Error,
        model::app::AppState,
        service::director::{verification::VerificationService, DirectorService, NewDirector},
    },
};

/// OpenAPI tag for director routes
pub static DIRECTOR_TAG: &str = "director";

impl From<entity::corporation_director::Model> for DirectorDto {
    fn from(director: entity::corporation_director::Model) -> Self {
        Self {
            id: director.id,
            character_id: director.character_id,
            character_name: director.character_name,
            priority: director.priority,
            is_healthy: director.is_healthy,
            failure_count: director.failure_count,
            last_failure_reason: director.last_failure_reason,
            last_health_check: director.last_health_check,
            last_used: director.last_used,
        }
    }
}

fn to_dtos(directors: Vec<entity::corporation_director::Model>) -> Vec<DirectorDto> {
    directors.into_iter().map(DirectorDto::from).collect()
}

/// List every director of a corporation in selection order
#[utoipa::path(
    get,
    path = "/api/corporations/{corporation_id}/directors",
    tag = DIRECTOR_TAG,
    params(("corporation_id" = i64, Path, description = "EVE Online corporation ID")),
    responses(
        (status = 200, description = "Directors of the corporation", body = Vec<DirectorDto>),
        (status = 404, description = "Corporation not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_directors(
    State(state): State<AppState>,
    Path(corporation_id): Path<i64>,
) -> Result<impl IntoResponse, Error> {
    let director_service = DirectorService::new(&state.db, &state.esi_client);

    let directors = director_service.list_directors(corporation_id).await?;

    Ok((StatusCode::OK, Json(to_dtos(directors))))
}

/// List the healthy directors of a corporation in selection order
#[utoipa::path(
    get,
    path = "/api/corporations/{corporation_id}/directors/healthy",
    tag = DIRECTOR_TAG,
    params(("corporation_id" = i64, Path, description = "EVE Online corporation ID")),
    responses(
        (status = 200, description = "Healthy directors, best first", body = Vec<DirectorDto>),
        (status = 404, description = "Corporation not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_healthy_directors(
    State(state): State<AppState>,
    Path(corporation_id): Path<i64>,
) -> Result<impl IntoResponse, Error> {
    let director_service = DirectorService::new(&state.db, &state.esi_client);

    let directors = director_service
        .list_healthy_directors(corporation_id)
        .await?;

    Ok((StatusCode::OK, Json(to_dtos(directors))))
}

/// Register a director for a corporation
#[utoipa::path(
    post,
    path = "/api/corporations/{corporation_id}/directors",
    tag = DIRECTOR_TAG,
    params(("corporation_id" = i64, Path, description = "EVE Online corporation ID")),
    request_body = AddDirectorDto,
    responses(
        (status = 201, description = "Director registered", body = DirectorDto),
        (status = 409, description = "Character already directs the corporation", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_director(
    State(state): State<AppState>,
    Path(corporation_id): Path<i64>,
    Json(body): Json<AddDirectorDto>,
) -> Result<impl IntoResponse, Error> {
    let director_service = DirectorService::new(&state.db, &state.esi_client);

    let director = director_service
        .add_director(
            corporation_id,
            NewDirector {
                character_id: body.character_id,
                character_name: body.character_name,
                priority: body.priority,
                refresh_token: body.refresh_token,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(DirectorDto::from(director))))
}

/// Remove a director from a corporation
#[utoipa::path(
    delete,
    path = "/api/corporations/{corporation_id}/directors/{character_id}",
    tag = DIRECTOR_TAG,
    params(
        ("corporation_id" = i64, Path, description = "EVE Online corporation ID"),
        ("character_id" = i64, Path, description = "EVE Online character ID of the director")
    ),
    responses(
        (status = 204, description = "Director removed"),
        (status = 404, description = "Corporation or director not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_director(
    State(state): State<AppState>,
    Path((corporation_id, character_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, Error> {
    let director_service = DirectorService::new(&state.db, &state.esi_client);

    director_service
        .remove_director(corporation_id, character_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Change the selection priority of a director, lower is preferred
#[utoipa::path(
    put,
    path = "/api/corporations/{corporation_id}/directors/{character_id}/priority",
    tag = DIRECTOR_TAG,
    params(
        ("corporation_id" = i64, Path, description = "EVE Online corporation ID"),
        ("character_id" = i64, Path, description = "EVE Online character ID of the director")
    ),
    request_body = UpdatePriorityDto,
    responses(
        (status = 200, description = "Priority updated", body = DirectorDto),
        (status = 404, description = "Corporation or director not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_priority(
    State(state): State<AppState>,
    Path((corporation_id, character_id)): Path<(i64, i64)>,
    Json(body): Json<UpdatePriorityDto>,
) -> Result<impl IntoResponse, Error> {
    let director_service = DirectorService::new(&state.db, &state.esi_client);

    let director = director_service
        .update_priority(corporation_id, character_id, body.priority)
        .await?;

    Ok((StatusCode::OK, Json(DirectorDto::from(director))))
}

/// Verify every director of a corporation now
#[utoipa::path(
    post,
    path = "/api/corporations/{corporation_id}/directors/verify",
    tag = DIRECTOR_TAG,
    params(("corporation_id" = i64, Path, description = "EVE Online corporation ID")),
    responses(
        (status = 200, description = "Verification tally", body = VerificationSummaryDto),
        (status = 404, description = "Corporation not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn verify_directors(
    State(state): State<AppState>,
    Path(corporation_id): Path<i64>,
) -> Result<impl IntoResponse, Error> {
    let verification_service = VerificationService::new(
        &state.db,
        state.director_client.as_ref(),
        state.events.as_ref(),
    );

    let summary = verification_service.verify_all(corporation_id).await?;

    Ok((
        StatusCode::OK,
        Json(VerificationSummaryDto {
            verified: summary.verified,
            failed: summary.failed,
        }),
    ))
}
