//! Test context structure and utilities.
//!
//! This module provides the `TestContext` returned by `TestBuilder`. The context includes an
//! in-memory SQLite database, a mock ESI/SSO server and an ESI client configured to use it.

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, StatementBuilder};

use crate::{
    constant::{
        TEST_CALLBACK_URL, TEST_ESI_CLIENT_ID, TEST_ESI_CLIENT_SECRET, TEST_TOKEN_PATH,
        TEST_USER_AGENT,
    },
    error::TestError,
};

/// Test context structure returned by `TestBuilder`
///
/// Provides access to the test environment:
/// - Mock ESI server (also serving the SSO token endpoint)
/// - Database connection
/// - ESI client configured to use the mock server
/// - Collection of mock endpoints for assertion
///
/// ```ignore
/// let mut test = TestBuilder::new().with_director_tables().build().await?;
///
/// test.director().insert_mock_director(1, 1, 100).await?;
///
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
    /// ESI client configured to use mock server
    pub esi_client: eve_esi::Client,

    /// Mock HTTP server for ESI & SSO endpoints
    pub(crate) server: ServerGuard,
    /// Collection of mock HTTP endpoints for assertion
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    /// Base URL of the mock ESI server
    pub fn esi_url(&self) -> String {
        self.server.url()
    }

    /// URL of the mock SSO token endpoint
    pub fn token_url(&self) -> String {
        format!("{}{}", self.server.url(), TEST_TOKEN_PATH)
    }

    /// Mutable access to the mock server for endpoints created mid-test
    pub fn server(&mut self) -> &mut ServerGuard {
        &mut self.server
    }
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context
    /// - `Err(TestError::EsiError)` - ESI client or config builder failed
    /// - `Err(TestError::DbErr)` - Database connection failed
    pub(crate) async fn new() -> Result<Self, TestError> {
        let mock_server = Server::new_async().await;
        let mock_server_url = mock_server.url();

        let esi_config = eve_esi::Config::builder()
            .esi_url(&mock_server_url)
            .token_url(&format!("{}{}", mock_server_url, TEST_TOKEN_PATH))
            .jwk_url(&format!("{}/oauth/jwks", mock_server_url))
            // Mock access tokens are opaque strings rather than signed JWTs
            .esi_validate_token_before_request(false)
            .build()?;

        let esi_client = eve_esi::Client::builder()
            .config(esi_config)
            .user_agent(TEST_USER_AGENT)
            .client_id(TEST_ESI_CLIENT_ID)
            .client_secret(TEST_ESI_CLIENT_SECRET)
            .callback_url(TEST_CALLBACK_URL)
            .build()?;

        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext {
            server: mock_server,
            db,
            esi_client,
            mocks: Vec::new(),
        })
    }

    /// Execute schema statements (tables, then indexes) against the test database.
    pub(crate) async fn with_schema<S: StatementBuilder>(
        &self,
        stmts: Vec<S>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
