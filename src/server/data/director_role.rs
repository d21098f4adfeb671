//! Persistence of director role snapshots.
use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter,
};

/// Repository for the corporation role snapshots taken during director verification.
pub struct DirectorRoleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DirectorRoleRepository<'a, C> {
    /// Creates a new instance of [`DirectorRoleRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Stores the latest role snapshot of a director, replacing any previous snapshot
    pub async fn upsert(
        &self,
        corporation_id: i32,
        character_id: i64,
        roles: String,
    ) -> Result<(), DbErr> {
        let role = entity::corporation_director_role::ActiveModel {
            corporation_id: ActiveValue::Set(corporation_id),
            character_id: ActiveValue::Set(character_id),
            roles: ActiveValue::Set(roles),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        entity::prelude::CorporationDirectorRole::insert(role)
            .on_conflict(
                OnConflict::columns([
                    entity::corporation_director_role::Column::CorporationId,
                    entity::corporation_director_role::Column::CharacterId,
                ])
                .update_columns([
                    entity::corporation_director_role::Column::Roles,
                    entity::corporation_director_role::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Finds the latest role snapshot of a director
    pub async fn find(
        &self,
        corporation_id: i32,
        character_id: i64,
    ) -> Result<Option<entity::corporation_director_role::Model>, DbErr> {
        entity::prelude::CorporationDirectorRole::find()
            .filter(entity::corporation_director_role::Column::CorporationId.eq(corporation_id))
            .filter(entity::corporation_director_role::Column::CharacterId.eq(character_id))
            .one(self.db)
            .await
    }
}
