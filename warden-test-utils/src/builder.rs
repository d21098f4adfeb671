//! Declarative test builder.
//!
//! The builder pattern allows chaining configuration methods together, with all operations
//! queued and executed during the final `build()` call.

use eve_esi::model::{character::Character, corporation::Corporation};
use mockito::Mock;
use sea_orm::{
    sea_query::{Index, IndexCreateStatement, TableCreateStatement},
    EntityTrait, Schema,
};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// Provides an interface for setting up test environments with database tables, mock fixtures,
/// and HTTP endpoints. Methods can be chained together and finalized with `build()`.
pub struct TestBuilder {
    // Schema to create
    tables: Vec<TableCreateStatement>,
    include_director_tables: bool,

    // Database fixtures to insert
    corporations: Vec<i64>,
    legacy_directors: Vec<(i64, i64)>, // (corporation_id, character_id)
    directors: Vec<(i64, i64, i32)>,   // (corporation_id, character_id, priority)
    tokens: Vec<i64>,                  // character_ids with a stored refresh token

    // Mock endpoints to create
    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,

    // Pre-configured endpoint shortcuts
    corporation_endpoints: Vec<(i64, Corporation, usize)>,
    character_endpoints: Vec<(i64, Character, usize)>,
    roles_endpoints: Vec<(i64, Vec<String>, usize)>,
    roles_error_endpoints: Vec<(i64, usize, usize)>, // (character_id, status, expected_requests)
    token_endpoints: Vec<usize>,
    token_rejected_endpoints: Vec<usize>,
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables, fixtures, or mock endpoints configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_director_tables: false,
            corporations: Vec::new(),
            legacy_directors: Vec::new(),
            directors: Vec::new(),
            tokens: Vec::new(),
            mock_builders: Vec::new(),
            corporation_endpoints: Vec::new(),
            character_endpoints: Vec::new(),
            roles_endpoints: Vec::new(),
            roles_error_endpoints: Vec::new(),
            token_endpoints: Vec::new(),
            token_rejected_endpoints: Vec::new(),
        }
    }

    /// Add every table used by director selection and verification.
    ///
    /// Creates EveCorporation, CorporationDirector, CorporationDirectorRole and
    /// EveCharacterToken along with the unique indexes the migrations define.
    pub fn with_director_tables(mut self) -> Self {
        self.include_director_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// ```no_run
    /// use warden_test_utils::TestBuilder;
    ///
    /// # async fn example() -> Result<(), warden_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(entity::prelude::EveCorporation)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert mock corporation into database.
    pub fn with_mock_corporation(mut self, corporation_id: i64) -> Self {
        self.corporations.push(corporation_id);
        self
    }

    /// Insert mock corporation which still has a single legacy director configured.
    pub fn with_legacy_director(mut self, corporation_id: i64, character_id: i64) -> Self {
        self.legacy_directors.push((corporation_id, character_id));
        self
    }

    /// Insert a healthy director, creating the corporation if it doesn't exist yet.
    pub fn with_mock_director(
        mut self,
        corporation_id: i64,
        character_id: i64,
        priority: i32,
    ) -> Self {
        self.directors
            .push((corporation_id, character_id, priority));
        self
    }

    /// Store a refresh token for the provided character.
    pub fn with_mock_token(mut self, character_id: i64) -> Self {
        self.tokens.push(character_id);
        self
    }

    /// Add mock corporation endpoint at `/corporations/{corporation_id}`.
    pub fn with_corporation_endpoint(
        mut self,
        corporation_id: i64,
        corporation: Corporation,
        expected_requests: usize,
    ) -> Self {
        self.corporation_endpoints
            .push((corporation_id, corporation, expected_requests));
        self
    }

    /// Add mock character endpoint at `/characters/{character_id}`.
    pub fn with_character_endpoint(
        mut self,
        character_id: i64,
        character: Character,
        expected_requests: usize,
    ) -> Self {
        self.character_endpoints
            .push((character_id, character, expected_requests));
        self
    }

    /// Add mock roles endpoint at `/characters/{character_id}/roles` returning `roles`.
    pub fn with_roles_endpoint(
        mut self,
        character_id: i64,
        roles: Vec<&str>,
        expected_requests: usize,
    ) -> Self {
        let roles = roles.into_iter().map(str::to_string).collect();
        self.roles_endpoints
            .push((character_id, roles, expected_requests));
        self
    }

    /// Add a roles endpoint responding with the provided error status.
    pub fn with_roles_error_endpoint(
        mut self,
        character_id: i64,
        status: usize,
        expected_requests: usize,
    ) -> Self {
        self.roles_error_endpoints
            .push((character_id, status, expected_requests));
        self
    }

    /// Add the SSO token endpoint accepting refresh token grants.
    pub fn with_token_endpoint(mut self, expected_requests: usize) -> Self {
        self.token_endpoints.push(expected_requests);
        self
    }

    /// Add the SSO token endpoint rejecting every refresh token with `invalid_grant`.
    pub fn with_token_rejected_endpoint(mut self, expected_requests: usize) -> Self {
        self.token_rejected_endpoints.push(expected_requests);
        self
    }

    /// Add a custom mock endpoint with full control over the mockito server.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Build the test setup by creating all configured tables, fixtures, and mock endpoints.
    ///
    /// Executes all queued operations in the following order:
    /// 1. Creates database tables and indexes
    /// 2. Inserts database fixtures (corporations, directors, tokens)
    /// 3. Creates mock HTTP endpoints (custom endpoints first, then shortcuts)
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Database table creation or fixture insertion failed
    /// - `Err(TestError::EsiError)` - Mock ESI client initialization failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        // 1. Create tables & indexes
        let mut all_tables = Vec::new();
        let mut all_indexes = Vec::new();

        if self.include_director_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::EveCorporation),
                schema.create_table_from_entity(entity::prelude::CorporationDirector),
                schema.create_table_from_entity(entity::prelude::CorporationDirectorRole),
                schema.create_table_from_entity(entity::prelude::EveCharacterToken),
            ]);
            all_indexes.extend(director_unique_indexes());
        }

        all_tables.extend(self.tables);
        setup.with_schema(all_tables).await?;
        setup.with_schema(all_indexes).await?;

        // 2. Insert database fixtures
        for corporation_id in self.corporations {
            setup.eve().insert_mock_corporation(corporation_id).await?;
        }

        for (corporation_id, character_id) in self.legacy_directors {
            setup
                .eve()
                .insert_mock_corporation_with_legacy_director(corporation_id, character_id)
                .await?;
        }

        for (corporation_id, character_id, priority) in self.directors {
            setup
                .director()
                .insert_mock_director(corporation_id, character_id, priority)
                .await?;
        }

        for character_id in self.tokens {
            setup.director().insert_mock_token(character_id).await?;
        }

        // 3. Create mock endpoints
        // Custom endpoints are created first so tests can register an error response ahead of
        // a success response for the same path
        let mut mocks = Vec::new();

        for builder in self.mock_builders {
            mocks.push(builder(&mut setup.server));
        }

        for (corporation_id, corporation, expected) in self.corporation_endpoints {
            mocks.push(setup.eve().create_corporation_endpoint(
                corporation_id,
                corporation,
                expected,
            ));
        }

        for (character_id, character, expected) in self.character_endpoints {
            mocks.push(
                setup
                    .eve()
                    .create_character_endpoint(character_id, character, expected),
            );
        }

        for (character_id, roles, expected) in self.roles_endpoints {
            mocks.push(
                setup
                    .eve()
                    .create_roles_endpoint(character_id, roles, expected),
            );
        }

        for (character_id, status, expected) in self.roles_error_endpoints {
            mocks.push(
                setup
                    .eve()
                    .create_roles_error_endpoint(character_id, status, expected),
            );
        }

        for expected in self.token_endpoints {
            mocks.push(setup.eve().create_token_endpoint(expected));
        }

        for expected in self.token_rejected_endpoints {
            mocks.push(setup.eve().create_token_rejected_endpoint(expected));
        }

        // Store mocks in setup so they live as long as the test
        setup.mocks = mocks;

        Ok(setup)
    }
}

/// Unique indexes mirroring the director migrations, which entity-generated tables lack.
fn director_unique_indexes() -> Vec<IndexCreateStatement> {
    vec![
        Index::create()
            .name("idx-corporation_director-corporation_id-character_id")
            .table(entity::prelude::CorporationDirector)
            .col(entity::corporation_director::Column::CorporationId)
            .col(entity::corporation_director::Column::CharacterId)
            .unique()
            .to_owned(),
        Index::create()
            .name("idx-corporation_director_role-corporation_id-character_id")
            .table(entity::prelude::CorporationDirectorRole)
            .col(entity::corporation_director_role::Column::CorporationId)
            .col(entity::corporation_director_role::Column::CharacterId)
            .unique()
            .to_owned(),
    ]
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builder_creates_director_tables() {
        let result = TestBuilder::new().with_director_tables().build().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_builder_inserts_directors() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_director_tables()
            .with_mock_director(1, 10, 100)
            .with_mock_director(1, 11, 50)
            .with_mock_token(10)
            .build()
            .await?;

        let directors = entity::prelude::CorporationDirector::find()
            .all(&test.db)
            .await?;
        assert_eq!(directors.len(), 2);
        assert!(directors.iter().all(|d| d.corporation_id == directors[0].corporation_id));

        Ok(())
    }

    #[tokio::test]
    async fn test_builder_enforces_unique_director() -> Result<(), TestError> {
        let result = TestBuilder::new()
            .with_director_tables()
            .with_mock_director(1, 10, 100)
            .with_mock_director(1, 10, 100)
            .build()
            .await;

        assert!(result.is_err());

        Ok(())
    }
}
