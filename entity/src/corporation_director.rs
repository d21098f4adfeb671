use sea_orm::entity::prelude::*;

/// A director character registered to perform authenticated ESI requests for a corporation
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "corporation_director")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub corporation_id: i32,
    pub character_id: i64,
    pub character_name: String,
    /// Lower values are preferred during selection
    pub priority: i32,
    pub is_healthy: bool,
    pub failure_count: i32,
    pub last_failure_reason: Option<String>,
    pub last_health_check: Option<DateTime>,
    pub last_used: Option<DateTime>,
    pub created_at: DateTime,
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
