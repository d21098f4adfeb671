//! Director registration, health tracking, selection and failover.
//!
//! A corporation registers one or more director characters whose credentials are used for
//! authenticated ESI requests. [`selector::DirectorSelector`] ranks healthy directors,
//! [`failover::FailoverCoordinator`] runs a request against them until one succeeds,
//! [`health::HealthTracker`] persists the outcome of every attempt, and
//! [`verification::VerificationService`] proactively re-checks every director.

pub mod event;
/// Failover of a single request across a corporation's healthy directors
pub mod failover;
pub mod health;
pub mod legacy;
/// Ranking of healthy directors
pub mod selector;
/// Proactive verification of every director
pub mod verification;

use dioxus_logger::tracing;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        character_token::CharacterTokenRepository,
        corporation::CorporationRepository,
        director::{DirectorRepository, DEFAULT_PRIORITY},
    },
    error::{director::DirectorError, Error},
    service::{
        corporation::CorporationService,
        director::{legacy::primary_director_of, selector::DirectorSelector},
    },
};

/// Details of a director to register.
#[derive(Clone, Debug, Default)]
pub struct NewDirector {
    /// EVE Online character ID
    pub character_id: i64,
    /// Display name, fetched from ESI when `None`
    pub character_name: Option<String>,
    /// Selection priority, [`DEFAULT_PRIORITY`] when `None`
    pub priority: Option<i32>,
    /// SSO refresh token for authenticated requests as this character
    pub refresh_token: Option<String>,
}

/// Resolves an EVE Online corporation ID to its stored corporation.
pub(crate) async fn find_corporation(
    db: &DatabaseConnection,
    corporation_id: i64,
) -> Result<entity::eve_corporation::Model, Error> {
    CorporationRepository::new(db)
        .find_by_corporation_id(corporation_id)
        .await?
        .ok_or_else(|| DirectorError::CorporationNotFound(corporation_id).into())
}

/// Direct management of a corporation's directors, with no failover involved.
pub struct DirectorService<'a> {
    db: &'a DatabaseConnection,
    esi_client: &'a eve_esi::Client,
}

impl<'a> DirectorService<'a> {
    /// Creates a new instance of [`DirectorService`]
    pub fn new(db: &'a DatabaseConnection, esi_client: &'a eve_esi::Client) -> Self {
        Self { db, esi_client }
    }

    /// Registers a director for the corporation
    ///
    /// The corporation is fetched from ESI if it isn't stored yet, as is the character name
    /// when none is provided. The director starts healthy with no failures.
    ///
    /// # Returns
    /// - `Ok(Model)`: The registered director
    /// - `Err(DirectorError::DuplicateCredential)`: The character already directs the corporation
    /// - `Err(Error::EsiError)`: Corporation or character could not be fetched from ESI
    /// - `Err(Error::DbErr)`: Database operation failed
    pub async fn add_director(
        &self,
        corporation_id: i64,
        new_director: NewDirector,
    ) -> Result<entity::corporation_director::Model, Error> {
        let duplicate = || DirectorError::DuplicateCredential {
            corporation_id,
            character_id: new_director.character_id,
        };

        let corporation = CorporationService::new(self.db, self.esi_client)
            .get_or_create_corporation(corporation_id)
            .await?;

        if DirectorRepository::new(self.db)
            .find_by_character(corporation.id, new_director.character_id)
            .await?
            .is_some()
        {
            return Err(duplicate().into());
        }

        let character_name = match new_director.character_name.clone() {
            Some(name) => name,
            None => {
                self.esi_client
                    .character()
                    .get_character_public_information(new_director.character_id)
                    .await?
                    .name
            }
        };

        let txn = self.db.begin().await?;

        let Some(director) = DirectorRepository::new(&txn)
            .create(
                corporation.id,
                new_director.character_id,
                character_name,
                new_director.priority.unwrap_or(DEFAULT_PRIORITY),
            )
            .await?
        else {
            return Err(duplicate().into());
        };

        if let Some(refresh_token) = new_director.refresh_token.clone() {
            CharacterTokenRepository::new(&txn)
                .upsert_refresh_token(new_director.character_id, refresh_token)
                .await?;
        }

        txn.commit().await?;

        tracing::info!(
            corporation_id,
            character_id = director.character_id,
            priority = director.priority,
            "Registered director {}",
            director.character_name
        );

        Ok(director)
    }

    /// Removes a director from the corporation
    pub async fn remove_director(
        &self,
        corporation_id: i64,
        character_id: i64,
    ) -> Result<(), Error> {
        let corporation = find_corporation(self.db, corporation_id).await?;

        let txn = self.db.begin().await?;
        let director_repo = DirectorRepository::new(&txn);

        let result = director_repo.delete(corporation.id, character_id).await?;
        if result.rows_affected == 0 {
            return Err(DirectorError::DirectorNotFound {
                corporation_id,
                character_id,
            }
            .into());
        }

        // Token is shared by every corporation the character directs
        if director_repo.count_by_character(character_id).await? == 0 {
            CharacterTokenRepository::new(&txn)
                .delete_by_character_id(character_id)
                .await?;
        }

        txn.commit().await?;

        tracing::info!(corporation_id, character_id, "Removed director");

        Ok(())
    }

    /// Changes the selection priority of a director
    pub async fn update_priority(
        &self,
        corporation_id: i64,
        character_id: i64,
        priority: i32,
    ) -> Result<entity::corporation_director::Model, Error> {
        let corporation = find_corporation(self.db, corporation_id).await?;
        let director_repo = DirectorRepository::new(self.db);

        let Some(director) = director_repo
            .find_by_character(corporation.id, character_id)
            .await?
        else {
            return Err(DirectorError::DirectorNotFound {
                corporation_id,
                character_id,
            }
            .into());
        };

        Ok(director_repo.update_priority(director.id, priority).await?)
    }

    /// Every director of the corporation, healthy or not, in selection order
    pub async fn list_directors(
        &self,
        corporation_id: i64,
    ) -> Result<Vec<entity::corporation_director::Model>, Error> {
        let corporation = find_corporation(self.db, corporation_id).await?;

        Ok(DirectorRepository::new(self.db)
            .find_by_corporation(corporation.id)
            .await?)
    }

    /// Healthy directors of the corporation in selection order
    pub async fn list_healthy_directors(
        &self,
        corporation_id: i64,
    ) -> Result<Vec<entity::corporation_director::Model>, Error> {
        let corporation = find_corporation(self.db, corporation_id).await?;

        DirectorSelector::new(self.db)
            .list_healthy(corporation.id)
            .await
    }

    /// The director single-director call sites should use, if any director is healthy
    pub async fn get_primary_director(
        &self,
        corporation_id: i64,
    ) -> Result<Option<entity::corporation_director::Model>, Error> {
        let healthy = self.list_healthy_directors(corporation_id).await?;

        Ok(primary_director_of(&healthy).cloned())
    }
}
