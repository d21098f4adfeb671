use sea_orm::entity::prelude::*;

/// Snapshot of a director's corporation roles captured during verification
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "corporation_director_role")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub corporation_id: i32,
    pub character_id: i64,
    /// JSON encoded role lists as returned by ESI
    pub roles: String,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::eve_corporation::Entity",
        from = "Column::CorporationId",
        to = "super::eve_corporation::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    EveCorporation,
}

impl Related<super::eve_corporation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EveCorporation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
