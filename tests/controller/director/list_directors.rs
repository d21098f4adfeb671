//! Tests for the list_directors and list_healthy_directors endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use warden::{
    model::director::DirectorDto,
    server::controller::director::{list_directors, list_healthy_directors},
};

use super::*;

/// Tests listing every director in selection order.
///
/// Verifies unhealthy directors are included and ordered by priority.
///
/// Expected: Ok with 200 OK response
#[tokio::test]
async fn lists_all_directors_in_selection_order() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_director_tables()
        .with_mock_director(98000001, 1, 200)
        .with_mock_director(98000001, 2, 100)
        .build()
        .await?;
    test.director().set_health(1, false, 3).await?;

    let result = list_directors(State(test.into_app_state()), Path(98000001)).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let directors: Vec<DirectorDto> = json_body(resp).await;
    let character_ids: Vec<i64> = directors.iter().map(|d| d.character_id).collect();
    assert_eq!(character_ids, vec![2, 1]);
    assert!(!directors[1].is_healthy);

    Ok(())
}

/// Tests listing only healthy directors.
///
/// Expected: Ok with 200 OK response containing the healthy director
#[tokio::test]
async fn lists_only_healthy_directors() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_director_tables()
        .with_mock_director(98000001, 1, 100)
        .with_mock_director(98000001, 2, 100)
        .build()
        .await?;
    test.director().set_health(1, false, 3).await?;

    let result = list_healthy_directors(State(test.into_app_state()), Path(98000001)).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let directors: Vec<DirectorDto> = json_body(resp).await;
    assert_eq!(directors.len(), 1);
    assert_eq!(directors[0].character_id, 2);

    Ok(())
}

/// Tests listing directors of an unknown corporation.
///
/// Expected: Err with 404 NOT FOUND response
#[tokio::test]
async fn not_found_for_unknown_corporation() -> Result<(), TestError> {
    let test = TestBuilder::new().with_director_tables().build().await?;

    let result = list_directors(State(test.into_app_state()), Path(98000001)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Tests error handling when the director tables are missing.
///
/// Expected: Err with 500 INTERNAL SERVER ERROR response
#[tokio::test]
async fn internal_error_without_tables() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let result = list_directors(State(test.into_app_state()), Path(98000001)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    Ok(())
}
