//! Persistence of director SSO tokens.
use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter,
};

/// Stored SSO tokens of director characters, one row per character.
pub struct CharacterTokenRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CharacterTokenRepository<'a, C> {
    /// Creates a new instance of [`CharacterTokenRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Stores a refresh token for a character, discarding any cached access token
    pub async fn upsert_refresh_token(
        &self,
        character_id: i64,
        refresh_token: String,
    ) -> Result<(), DbErr> {
        let token = entity::eve_character_token::ActiveModel {
            character_id: ActiveValue::Set(character_id),
            refresh_token: ActiveValue::Set(refresh_token),
            access_token: ActiveValue::Set(None),
            expires_at: ActiveValue::Set(None),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        entity::prelude::EveCharacterToken::insert(token)
            .on_conflict(
                OnConflict::column(entity::eve_character_token::Column::CharacterId)
                    .update_columns([
                        entity::eve_character_token::Column::RefreshToken,
                        entity::eve_character_token::Column::AccessToken,
                        entity::eve_character_token::Column::ExpiresAt,
                        entity::eve_character_token::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Finds the stored tokens of a character
    pub async fn find_by_character_id(
        &self,
        character_id: i64,
    ) -> Result<Option<entity::eve_character_token::Model>, DbErr> {
        entity::prelude::EveCharacterToken::find()
            .filter(entity::eve_character_token::Column::CharacterId.eq(character_id))
            .one(self.db)
            .await
    }

    /// Caches a freshly issued access token
    ///
    /// The refresh token is only replaced when SSO rotated it.
    pub async fn update_access_token(
        &self,
        id: i32,
        access_token: String,
        expires_at: NaiveDateTime,
        refresh_token: Option<String>,
    ) -> Result<entity::eve_character_token::Model, DbErr> {
        let mut token = entity::eve_character_token::ActiveModel {
            id: ActiveValue::Unchanged(id),
            access_token: ActiveValue::Set(Some(access_token)),
            expires_at: ActiveValue::Set(Some(expires_at)),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        if let Some(refresh_token) = refresh_token {
            token.refresh_token = ActiveValue::Set(refresh_token);
        }

        token.update(self.db).await
    }

    /// Deletes the stored tokens of a character, returning the number of rows removed
    pub async fn delete_by_character_id(&self, character_id: i64) -> Result<u64, DbErr> {
        let result = entity::prelude::EveCharacterToken::delete_many()
            .filter(entity::eve_character_token::Column::CharacterId.eq(character_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
