//! Tests for director controller endpoints.

mod add_director;
mod list_directors;
mod remove_director;
mod update_priority;
mod verify_directors;

use axum::{body::to_bytes, response::Response};
use serde::de::DeserializeOwned;

use super::*;

/// Decodes a JSON response body
async fn json_body<T: DeserializeOwned>(resp: Response) -> T {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
