//! Persistence of EVE Online corporations.
use chrono::{NaiveDateTime, Utc};
use eve_esi::model::corporation::Corporation;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter,
};

/// Repository for EVE Online corporations and their verification state.
pub struct CorporationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CorporationRepository<'a, C> {
    /// Creates a new instance of [`CorporationRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts or updates a corporation using information fetched from ESI
    pub async fn upsert(
        &self,
        corporation_id: i64,
        corporation: Corporation,
    ) -> Result<entity::eve_corporation::Model, DbErr> {
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

        entity::prelude::EveCorporation::insert_many(vec![corporation])
            .on_conflict(
                OnConflict::column(entity::eve_corporation::Column::CorporationId)
                    .update_columns([
                        entity::eve_corporation::Column::Name,
                        entity::eve_corporation::Column::Ticker,
                        entity::eve_corporation::Column::MemberCount,
                        entity::eve_corporation::Column::InfoUpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await?
            .into_iter()
            .next()
            .ok_or(DbErr::RecordNotInserted)
    }

    /// Finds a corporation by its EVE Online corporation ID
    pub async fn find_by_corporation_id(
        &self,
        corporation_id: i64,
    ) -> Result<Option<entity::eve_corporation::Model>, DbErr> {
        entity::prelude::EveCorporation::find()
            .filter(entity::eve_corporation::Column::CorporationId.eq(corporation_id))
            .one(self.db)
            .await
    }

    /// Finds a corporation by its internal ID
    pub async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<entity::eve_corporation::Model>, DbErr> {
        entity::prelude::EveCorporation::find_by_id(id)
            .one(self.db)
            .await
    }

    /// Stores the outcome of a verification pass on the corporation
    pub async fn update_verification(
        &self,
        id: i32,
        is_verified: bool,
        verified_at: NaiveDateTime,
    ) -> Result<entity::eve_corporation::Model, DbErr> {
        let corporation = entity::eve_corporation::ActiveModel {
            id: ActiveValue::Unchanged(id),
            is_verified: ActiveValue::Set(is_verified),
            last_verified_at: ActiveValue::Set(Some(verified_at)),
            ..Default::default()
        };

        corporation.update(self.db).await
    }

    /// Corporations which still carry a single pre-multi-director director character
    pub async fn find_with_legacy_director(
        &self,
    ) -> Result<Vec<entity::eve_corporation::Model>, DbErr> {
        entity::prelude::EveCorporation::find()
            .filter(entity::eve_corporation::Column::LegacyDirectorCharacterId.is_not_null())
            .all(self.db)
            .await
    }

    /// Removes the legacy director character once it was promoted
    pub async fn clear_legacy_director(
        &self,
        id: i32,
    ) -> Result<entity::eve_corporation::Model, DbErr> {
        let corporation = entity::eve_corporation::ActiveModel {
            id: ActiveValue::Unchanged(id),
            legacy_director_character_id: ActiveValue::Set(None),
            legacy_director_name: ActiveValue::Set(None),
            ..Default::default()
        };

        corporation.update(self.db).await
    }
}
