//! Tests for the remove_director endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use warden::server::controller::director::remove_director;

use super::*;

/// Tests removing a registered director.
///
/// Expected: Ok with 204 NO CONTENT response
#[tokio::test]
async fn removes_director() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_director_tables()
        .with_mock_director(98000001, 1, 100)
        .build()
        .await?;

    let result = remove_director(State(test.into_app_state()), Path((98000001, 1))).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(test.director().get(1).await?.is_none());

    Ok(())
}

/// Tests removing a character which isn't a director.
///
/// Expected: Err with 404 NOT FOUND response
#[tokio::test]
async fn not_found_for_unknown_director() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_director_tables()
        .with_mock_corporation(98000001)
        .build()
        .await?;

    let result = remove_director(State(test.into_app_state()), Path((98000001, 1))).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
