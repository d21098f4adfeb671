use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251017_000001_eve_corporation::EveCorporation;

static IDX_DIRECTOR_ROLE_CORPORATION_CHARACTER: &str =
    "idx-corporation_director_role-corporation_id-character_id";
static FK_DIRECTOR_ROLE_CORPORATION_ID: &str = "fk-corporation_director_role-corporation_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CorporationDirectorRole::Table)
                    .if_not_exists()
                    .col(pk_auto(CorporationDirectorRole::Id))
                    .col(integer(CorporationDirectorRole::CorporationId))
                    .col(big_integer(CorporationDirectorRole::CharacterId))
                    .col(text(CorporationDirectorRole::Roles))
                    .col(timestamp(CorporationDirectorRole::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DIRECTOR_ROLE_CORPORATION_CHARACTER)
                    .table(CorporationDirectorRole::Table)
                    .col(CorporationDirectorRole::CorporationId)
                    .col(CorporationDirectorRole::CharacterId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DIRECTOR_ROLE_CORPORATION_ID)
                    .from_tbl(CorporationDirectorRole::Table)
                    .from_col(CorporationDirectorRole::CorporationId)
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
                    .name(FK_DIRECTOR_ROLE_CORPORATION_ID)
                    .table(CorporationDirectorRole::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DIRECTOR_ROLE_CORPORATION_CHARACTER)
                    .table(CorporationDirectorRole::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(CorporationDirectorRole::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CorporationDirectorRole {
    Table,
    Id,
    CorporationId,
    CharacterId,
    Roles,
    UpdatedAt,
}
