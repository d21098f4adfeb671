//! Tests for the verify_directors endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use warden::{
    model::director::VerificationSummaryDto, server::controller::director::verify_directors,
};

use super::*;

/// Tests verifying directors against the mock ESI and SSO servers.
///
/// Director 1 holds a valid token and passes, director 2 has no stored token and fails.
///
/// Expected: Ok with 200 OK response and a tally of 1 verified, 1 failed
#[tokio::test]
async fn verifies_directors() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_director_tables()
        .with_mock_director(98000001, 1, 100)
        .with_mock_director(98000001, 2, 100)
        .with_mock_token(1)
        .with_token_endpoint(1)
        .with_roles_endpoint(1, vec!["Director"], 1)
        .build()
        .await?;
    test.director().set_health(1, false, 3).await?;

    let result = verify_directors(State(test.into_app_state()), Path(98000001)).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let summary: VerificationSummaryDto = json_body(resp).await;
    assert_eq!(
        summary,
        VerificationSummaryDto {
            verified: 1,
            failed: 1
        }
    );

    let verified = test.director().get(1).await?.unwrap();
    assert!(verified.is_healthy);
    assert_eq!(verified.failure_count, 0);
    let failed = test.director().get(2).await?.unwrap();
    assert_eq!(failed.failure_count, 1);
    test.assert_mocks();

    Ok(())
}

/// Tests verifying directors of an unknown corporation.
///
/// Expected: Err with 404 NOT FOUND response
#[tokio::test]
async fn not_found_for_unknown_corporation() -> Result<(), TestError> {
    let test = TestBuilder::new().with_director_tables().build().await?;

    let result = verify_directors(State(test.into_app_state()), Path(98000001)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
