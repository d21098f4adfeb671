use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, QueryFilter};

use crate::{error::TestError, model::EveCorporationModel, TestContext};

pub mod factory;
pub mod mockito;

impl TestContext {
    pub fn eve<'a>(&'a mut self) -> EveFixtures<'a> {
        EveFixtures { setup: self }
    }
}

pub struct EveFixtures<'a> {
    pub setup: &'a mut TestContext,
}

impl<'a> EveFixtures<'a> {
    /// Insert a mock corporation, returning the existing record if already present.
    ///
    /// # Arguments
    /// - `corporation_id` - The EVE Online corporation ID
    ///
    /// # Returns
    /// - `Ok(EveCorporationModel)` - The inserted or existing corporation
    /// - `Err(TestError::DbErr)` - Database operation failed
    pub async fn insert_mock_corporation(
        &mut self,
        corporation_id: i64,
    ) -> Result<EveCorporationModel, TestError> {
        if let Some(existing) = entity::prelude::EveCorporation::find()
            .filter(entity::eve_corporation::Column::CorporationId.eq(corporation_id))
            .one(&self.setup.db)
            .await?
        {
            return Ok(existing);
        }

        let corporation = factory::mock_corporation(None, None);
        let now = Utc::now().naive_utc();

        let corporation = entity::eve_corporation::ActiveModel {
            corporation_id: ActiveValue::Set(corporation_id),
            name: ActiveValue::Set(corporation.name),
            ticker: ActiveValue::Set(corporation.ticker),
            member_count: ActiveValue::Set(i64::from(corporation.member_count)),
            is_verified: ActiveValue::Set(false),
            last_verified_at: ActiveValue::Set(None),
            legacy_director_character_id: ActiveValue::Set(None),
            legacy_director_name: ActiveValue::Set(None),
            info_updated_at: ActiveValue::Set(now),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        };

        Ok(corporation.insert(&self.setup.db).await?)
    }

    /// Insert a mock corporation which still carries a single legacy director character.
    pub async fn insert_mock_corporation_with_legacy_director(
        &mut self,
        corporation_id: i64,
        character_id: i64,
    ) -> Result<EveCorporationModel, TestError> {
        let corporation = self.insert_mock_corporation(corporation_id).await?;

        let mut corporation_am: entity::eve_corporation::ActiveModel = corporation.into();
        corporation_am.legacy_director_character_id = ActiveValue::Set(Some(character_id));
        corporation_am.legacy_director_name =
            ActiveValue::Set(Some(factory::mock_character_name(character_id)));

        Ok(corporation_am.update(&self.setup.db).await?)
    }
}
