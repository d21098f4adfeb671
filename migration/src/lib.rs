pub use sea_orm_migration::prelude::*;

mod m20251017_000001_eve_corporation;
mod m20251017_000002_corporation_director;
mod m20251017_000003_corporation_director_role;
mod m20251017_000004_eve_character_token;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251017_000001_eve_corporation::Migration),
            Box::new(m20251017_000002_corporation_director::Migration),
            Box::new(m20251017_000003_corporation_director_role::Migration),
            Box::new(m20251017_000004_eve_character_token::Migration),
        ]
    }
}
