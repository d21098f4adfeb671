use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "eve_corporation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub corporation_id: i64,
    pub name: String,
    pub ticker: String,
    pub member_count: i64,
    /// True when at least one director passed the most recent verification pass
    pub is_verified: bool,
    pub last_verified_at: Option<DateTime>,
    /// Single director character configured before multi-director support
    pub legacy_director_character_id: Option<i64>,
    pub legacy_director_name: Option<String>,
    pub info_updated_at: DateTime,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::corporation_director::Entity")]
    CorporationDirector,
    #[sea_orm(has_many = "super::corporation_director_role::Entity")]
    CorporationDirectorRole,
}

impl Related<super::corporation_director::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CorporationDirector.def()
    }
}

impl Related<super::corporation_director_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CorporationDirectorRole.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
