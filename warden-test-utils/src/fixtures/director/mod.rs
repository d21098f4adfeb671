//! Corporation director fixture utilities.
//!
//! Inserts director records in the default registration state and lets tests move them into
//! specific health states without going through the service layer.

use chrono::{NaiveDateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, EntityTrait};

use crate::{
    constant::TEST_REFRESH_TOKEN,
    error::TestError,
    fixtures::eve::factory,
    model::{CorporationDirectorModel, EveCharacterTokenModel},
    TestContext,
};

impl TestContext {
    pub fn director<'a>(&'a mut self) -> DirectorFixtures<'a> {
        DirectorFixtures { setup: self }
    }
}

pub struct DirectorFixtures<'a> {
    pub setup: &'a mut TestContext,
}

impl<'a> DirectorFixtures<'a> {
    /// Insert a healthy director for a corporation, creating the corporation if needed.
    ///
    /// # Arguments
    /// - `corporation_id` - EVE Online corporation ID the director belongs to
    /// - `character_id` - EVE Online character ID of the director
    /// - `priority` - Selection priority, lower is preferred
    ///
    /// # Returns
    /// - `Ok(CorporationDirectorModel)` - The inserted director
    /// - `Err(TestError::DbErr)` - Database operation failed
    pub async fn insert_mock_director(
        &mut self,
        corporation_id: i64,
        character_id: i64,
        priority: i32,
    ) -> Result<CorporationDirectorModel, TestError> {
        let corporation = self
            .setup
            .eve()
            .insert_mock_corporation(corporation_id)
            .await?;
        let now = Utc::now().naive_utc();

        let director = entity::corporation_director::ActiveModel {
            corporation_id: ActiveValue::Set(corporation.id),
            character_id: ActiveValue::Set(character_id),
            character_name: ActiveValue::Set(factory::mock_character_name(character_id)),
            priority: ActiveValue::Set(priority),
            is_healthy: ActiveValue::Set(true),
            failure_count: ActiveValue::Set(0),
            last_failure_reason: ActiveValue::Set(None),
            last_health_check: ActiveValue::Set(None),
            last_used: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        Ok(director.insert(&self.setup.db).await?)
    }

    /// Overwrite the health fields of an existing director.
    pub async fn set_health(
        &mut self,
        director_id: i32,
        is_healthy: bool,
        failure_count: i32,
    ) -> Result<CorporationDirectorModel, TestError> {
        let director = entity::corporation_director::ActiveModel {
            id: ActiveValue::Unchanged(director_id),
            is_healthy: ActiveValue::Set(is_healthy),
            failure_count: ActiveValue::Set(failure_count),
            last_failure_reason: ActiveValue::Set(
                (!is_healthy).then(|| "mock failure".to_string()),
            ),
            ..Default::default()
        };

        Ok(director.update(&self.setup.db).await?)
    }

    /// Overwrite the last used timestamp of an existing director.
    pub async fn set_last_used(
        &mut self,
        director_id: i32,
        last_used: Option<NaiveDateTime>,
    ) -> Result<CorporationDirectorModel, TestError> {
        let director = entity::corporation_director::ActiveModel {
            id: ActiveValue::Unchanged(director_id),
            last_used: ActiveValue::Set(last_used),
            ..Default::default()
        };

        Ok(director.update(&self.setup.db).await?)
    }

    /// Store a refresh token for a director character with no cached access token.
    pub async fn insert_mock_token(
        &mut self,
        character_id: i64,
    ) -> Result<EveCharacterTokenModel, TestError> {
        let token = entity::eve_character_token::ActiveModel {
            character_id: ActiveValue::Set(character_id),
            refresh_token: ActiveValue::Set(TEST_REFRESH_TOKEN.to_string()),
            access_token: ActiveValue::Set(None),
            expires_at: ActiveValue::Set(None),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        Ok(token.insert(&self.setup.db).await?)
    }

    /// Fetch a director directly from the database.
    pub async fn get(
        &mut self,
        director_id: i32,
    ) -> Result<Option<CorporationDirectorModel>, TestError> {
        Ok(entity::prelude::CorporationDirector::find_by_id(director_id)
            .one(&self.setup.db)
            .await?)
    }
}
