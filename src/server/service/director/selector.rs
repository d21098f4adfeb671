use sea_orm::DatabaseConnection;

use crate::server::{data::director::DirectorRepository, error::Error};

/// Ranks the healthy directors of a corporation.
///
/// Directors are ordered by priority, lower first. Within a priority the least recently used
/// director comes first and directors which were never used come before all others. Every
/// successful use stamps `last_used`, so repeated selection rotates through a priority tier.
pub struct DirectorSelector<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DirectorSelector<'a> {
    /// Creates a new instance of [`DirectorSelector`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Healthy directors of the corporation in selection order, empty if none are healthy
    pub async fn list_healthy(
        &self,
        corporation_id: i32,
    ) -> Result<Vec<entity::corporation_director::Model>, Error> {
        let director_repo = DirectorRepository::new(self.db);

        Ok(director_repo
            .find_healthy_by_corporation(corporation_id)
            .await?)
    }

    /// The best healthy director of the corporation, if any
    pub async fn select_one(
        &self,
        corporation_id: i32,
    ) -> Result<Option<entity::corporation_director::Model>, Error> {
        Ok(self.list_healthy(corporation_id).await?.into_iter().next())
    }
}
