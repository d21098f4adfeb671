//! Tests for the add_director endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use warden::{
    model::director::{AddDirectorDto, DirectorDto},
    server::controller::director::add_director,
};

use super::*;

/// Tests registering a director for a corporation which isn't stored yet.
///
/// Verifies the corporation and character name are fetched from ESI.
///
/// Expected: Ok with 201 CREATED response
#[tokio::test]
async fn creates_director_and_corporation() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_director_tables()
        .with_corporation_endpoint(98000001, factory::mock_corporation(None, None), 1)
        .with_character_endpoint(2114794365, factory::mock_character(98000001), 1)
        .build()
        .await?;

    let body = AddDirectorDto {
        character_id: 2114794365,
        character_name: None,
        priority: None,
        refresh_token: Some("refresh_token".to_string()),
    };
    let result = add_director(State(test.into_app_state()), Path(98000001), Json(body)).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let director: DirectorDto = json_body(resp).await;
    assert_eq!(director.character_name, "Hyziri");
    assert_eq!(director.priority, 100);
    assert!(director.is_healthy);
    assert_eq!(director.failure_count, 0);
    test.assert_mocks();

    Ok(())
}

/// Tests registering the same character twice.
///
/// Expected: Err with 409 CONFLICT response
#[tokio::test]
async fn conflict_for_duplicate_director() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_director_tables()
        .with_mock_director(98000001, 1, 100)
        .build()
        .await?;

    let body = AddDirectorDto {
        character_id: 1,
        character_name: Some("Director 1".to_string()),
        priority: Some(10),
        refresh_token: None,
    };
    let result = add_director(State(test.into_app_state()), Path(98000001), Json(body)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    Ok(())
}
