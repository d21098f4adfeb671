//! Compatibility with corporations configured before multiple directors were supported.

use dioxus_logger::tracing;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        corporation::CorporationRepository,
        director::{DirectorRepository, DEFAULT_PRIORITY},
    },
    error::Error,
};

/// The director old single-director call sites treat as "the" configured director.
///
/// Picks the healthy director with the lowest priority, ties broken by id. Recency is ignored
/// so the result stays stable between calls.
pub fn primary_director_of(
    directors: &[entity::corporation_director::Model],
) -> Option<&entity::corporation_director::Model> {
    directors
        .iter()
        .filter(|director| director.is_healthy)
        .min_by_key(|director| (director.priority, director.id))
}

/// Converts corporations configured with a single director into director entries.
pub struct LegacyDirectorService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LegacyDirectorService<'a> {
    /// Creates a new instance of [`LegacyDirectorService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Promotes each corporation's legacy director into a registered director
    ///
    /// A corporation which already has directors registered keeps them and only has its legacy
    /// columns cleared. Running this again after a completed run does nothing.
    ///
    /// # Returns
    /// - `Ok(usize)`: Number of directors created
    /// - `Err(Error::DbErr)`: Database operation failed
    pub async fn promote_all(&self) -> Result<usize, Error> {
        let corporations = CorporationRepository::new(self.db)
            .find_with_legacy_director()
            .await?;

        let mut promoted = 0;
        for corporation in corporations {
            let Some(character_id) = corporation.legacy_director_character_id else {
                continue;
            };

            let txn = self.db.begin().await?;
            let director_repo = DirectorRepository::new(&txn);

            if director_repo.count_by_corporation(corporation.id).await? == 0 {
                let character_name = corporation
                    .legacy_director_name
                    .clone()
                    .unwrap_or_else(|| format!("Character {}", character_id));

                if director_repo
                    .create(corporation.id, character_id, character_name, DEFAULT_PRIORITY)
                    .await?
                    .is_some()
                {
                    promoted += 1;
                    tracing::info!(
                        corporation_id = corporation.corporation_id,
                        character_id,
                        "Promoted legacy director"
                    );
                }
            }

            CorporationRepository::new(&txn)
                .clear_legacy_director(corporation.id)
                .await?;
            txn.commit().await?;
        }

        Ok(promoted)
    }
}
