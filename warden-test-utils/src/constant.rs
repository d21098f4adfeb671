//! Test configuration constants for EVE ESI client setup.
//!
//! These values are placeholders used by every test context and are not real credentials.

/// User agent string for test ESI client requests.
pub static TEST_USER_AGENT: &str = "Warden/0.1.0 (contact@example.com)";

/// Mock ESI OAuth2 client ID for testing.
pub static TEST_ESI_CLIENT_ID: &str = "esi_client_id";

/// Mock ESI OAuth2 client secret for testing.
pub static TEST_ESI_CLIENT_SECRET: &str = "esi_client_secret";

/// Mock OAuth2 callback URL for testing.
pub static TEST_CALLBACK_URL: &str = "http://localhost:8080/auth/callback";

/// Path of the SSO token endpoint on the mock server.
pub static TEST_TOKEN_PATH: &str = "/v2/oauth/token";

/// Refresh token stored by director token fixtures.
pub static TEST_REFRESH_TOKEN: &str = "mock_refresh_token";

/// Access token returned by the mock SSO token endpoint.
pub static TEST_ACCESS_TOKEN: &str = "mock_access_token";
