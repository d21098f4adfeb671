use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251017_000001_eve_corporation::EveCorporation;

static IDX_CORPORATION_DIRECTOR_CORPORATION_CHARACTER: &str =
    "idx-corporation_director-corporation_id-character_id";
static IDX_CORPORATION_DIRECTOR_SELECTION: &str =
    "idx-corporation_director-corporation_id-is_healthy-priority";
static FK_CORPORATION_DIRECTOR_CORPORATION_ID: &str = "fk-corporation_director-corporation_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CorporationDirector::Table)
                    .if_not_exists()
                    .col(pk_auto(CorporationDirector::Id))
                    .col(integer(CorporationDirector::CorporationId))
                    .col(big_integer(CorporationDirector::CharacterId))
                    .col(string(CorporationDirector::CharacterName))
                    .col(integer(CorporationDirector::Priority).default(100))
                    .col(boolean(CorporationDirector::IsHealthy).default(true))
                    .col(integer(CorporationDirector::FailureCount).default(0))
                    .col(text_null(CorporationDirector::LastFailureReason))
                    .col(timestamp_null(CorporationDirector::LastHealthCheck))
                    .col(timestamp_null(CorporationDirector::LastUsed))
                    .col(timestamp(CorporationDirector::CreatedAt))
                    .col(timestamp(CorporationDirector::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // A character can only be registered once per corporation
        manager
            .create_index(
                Index::create()
                    .name(IDX_CORPORATION_DIRECTOR_CORPORATION_CHARACTER)
                    .table(CorporationDirector::Table)
                    .col(CorporationDirector::CorporationId)
                    .col(CorporationDirector::CharacterId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CORPORATION_DIRECTOR_SELECTION)
                    .table(CorporationDirector::Table)
                    .col(CorporationDirector::CorporationId)
                    .col(CorporationDirector::IsHealthy)
                    .col(CorporationDirector::Priority)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_CORPORATION_DIRECTOR_CORPORATION_ID)
                    .from_tbl(CorporationDirector::Table)
                    .from_col(CorporationDirector::CorporationId)
                    .to_tbl(EveCorporation::Table)
                    .to_col(EveCorporation::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .on_update(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_CORPORATION_DIRECTOR_CORPORATION_ID)
                    .table(CorporationDirector::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CORPORATION_DIRECTOR_SELECTION)
                    .table(CorporationDirector::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CORPORATION_DIRECTOR_CORPORATION_CHARACTER)
                    .table(CorporationDirector::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CorporationDirector::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CorporationDirector {
    Table,
    Id,
    CorporationId,
    CharacterId,
    CharacterName,
    Priority,
    IsHealthy,
    FailureCount,
    LastFailureReason,
    LastHealthCheck,
    LastUsed,
    CreatedAt,
    UpdatedAt,
}
