use sea_orm_migration::{prelude::*, schema::*};

static IDX_EVE_CORPORATION_LEGACY_DIRECTOR: &str = "idx-eve_corporation-legacy_director_character_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EveCorporation::Table)
                    .if_not_exists()
                    .col(pk_auto(EveCorporation::Id))
                    .col(big_integer_uniq(EveCorporation::CorporationId))
                    .col(string(EveCorporation::Name))
                    .col(string(EveCorporation::Ticker))
                    .col(big_integer(EveCorporation::MemberCount))
                    .col(boolean(EveCorporation::IsVerified).default(false))
                    .col(timestamp_null(EveCorporation::LastVerifiedAt))
                    .col(big_integer_null(EveCorporation::LegacyDirectorCharacterId))
                    .col(string_null(EveCorporation::LegacyDirectorName))
                    .col(timestamp(EveCorporation::InfoUpdatedAt))
                    .col(timestamp(EveCorporation::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_EVE_CORPORATION_LEGACY_DIRECTOR)
                    .table(EveCorporation::Table)
                    .col(EveCorporation::LegacyDirectorCharacterId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_EVE_CORPORATION_LEGACY_DIRECTOR)
                    .table(EveCorporation::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(EveCorporation::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum EveCorporation {
    Table,
    Id,
    CorporationId,
    Name,
    Ticker,
    MemberCount,
    IsVerified,
    LastVerifiedAt,
    LegacyDirectorCharacterId,
    LegacyDirectorName,
    InfoUpdatedAt,
    CreatedAt,
}
