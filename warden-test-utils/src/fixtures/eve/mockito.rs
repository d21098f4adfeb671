//! ESI and SSO mock endpoint creation utilities.
//!
//! Endpoints are registered with the mockito server and verify they were called the expected
//! number of times when `TestContext::assert_mocks` runs.

use eve_esi::model::{character::Character, corporation::Corporation};
use mockito::{Matcher, Mock};
use serde_json::json;

use crate::{
    constant::{TEST_ACCESS_TOKEN, TEST_REFRESH_TOKEN, TEST_TOKEN_PATH},
    fixtures::eve::EveFixtures,
};

impl<'a> EveFixtures<'a> {
    /// Create a mock HTTP endpoint at `/corporations/{corporation_id}`.
    pub fn create_corporation_endpoint(
        &mut self,
        corporation_id: i64,
        mock_corporation: Corporation,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/corporations/{}", corporation_id);

        self.setup
            .server
            .mock("GET", url.as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&mock_corporation).unwrap())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock HTTP endpoint at `/characters/{character_id}`.
    pub fn create_character_endpoint(
        &mut self,
        character_id: i64,
        mock_character: Character,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/characters/{}", character_id);

        self.setup
            .server
            .mock("GET", url.as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&mock_character).unwrap())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock authenticated endpoint at `/characters/{character_id}/roles`.
    ///
    /// The endpoint only matches requests carrying the mock access token as bearer token.
    pub fn create_roles_endpoint(
        &mut self,
        character_id: i64,
        roles: Vec<String>,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/characters/{}/roles", character_id);
        let body = json!({
            "roles": roles,
            "roles_at_base": [],
            "roles_at_hq": [],
            "roles_at_other": []
        });

        self.setup
            .server
            .mock("GET", url.as_str())
            .match_header(
                "authorization",
                format!("Bearer {}", TEST_ACCESS_TOKEN).as_str(),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a failing mock endpoint at `/characters/{character_id}/roles`.
    pub fn create_roles_error_endpoint(
        &mut self,
        character_id: i64,
        status: usize,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/characters/{}/roles", character_id);
        let body = json!({ "error": format!("mock error with status {}", status) });

        self.setup
            .server
            .mock("GET", url.as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock SSO token endpoint accepting refresh token grants.
    pub fn create_token_endpoint(&mut self, expected_requests: usize) -> Mock {
        let body = json!({
            "access_token": TEST_ACCESS_TOKEN,
            "expires_in": 1199,
            "token_type": "Bearer",
            "refresh_token": TEST_REFRESH_TOKEN
        });

        self.setup
            .server
            .mock("POST", TEST_TOKEN_PATH)
            .match_body(Matcher::UrlEncoded(
                "grant_type".to_string(),
                "refresh_token".to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock SSO token endpoint rejecting the refresh token with `invalid_grant`.
    pub fn create_token_rejected_endpoint(&mut self, expected_requests: usize) -> Mock {
        let body = json!({
            "error": "invalid_grant",
            "error_description": "Invalid refresh token. Token missing/expired."
        });

        self.setup
            .server
            .mock("POST", TEST_TOKEN_PATH)
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }
}
