use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EveCharacterToken::Table)
                    .if_not_exists()
                    .col(pk_auto(EveCharacterToken::Id))
                    .col(big_integer_uniq(EveCharacterToken::CharacterId))
                    .col(text(EveCharacterToken::RefreshToken))
                    .col(text_null(EveCharacterToken::AccessToken))
                    .col(timestamp_null(EveCharacterToken::ExpiresAt))
                    .col(timestamp(EveCharacterToken::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EveCharacterToken::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum EveCharacterToken {
    Table,
    Id,
    CharacterId,
    RefreshToken,
    AccessToken,
    ExpiresAt,
    UpdatedAt,
}
