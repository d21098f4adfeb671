//! Tests for the update_priority endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use warden::{
    model::director::{DirectorDto, UpdatePriorityDto},
    server::controller::director::update_priority,
};

use super::*;

/// Tests changing the priority of a director.
///
/// Expected: Ok with 200 OK response containing the new priority
#[tokio::test]
async fn updates_priority() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_director_tables()
        .with_mock_director(98000001, 1, 100)
        .build()
        .await?;

    let result = update_priority(
        State(test.into_app_state()),
        Path((98000001, 1)),
        Json(UpdatePriorityDto { priority: 5 }),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let director: DirectorDto = json_body(resp).await;
    assert_eq!(director.priority, 5);

    Ok(())
}

/// Tests changing the priority of a character which isn't a director.
///
/// Expected: Err with 404 NOT FOUND response
#[tokio::test]
async fn not_found_for_unknown_director() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_director_tables()
        .with_mock_corporation(98000001)
        .build()
        .await?;

    let result = update_priority(
        State(test.into_app_state()),
        Path((98000001, 1)),
        Json(UpdatePriorityDto { priority: 5 }),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
