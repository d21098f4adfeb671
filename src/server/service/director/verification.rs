use chrono::Utc;
use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{corporation::CorporationRepository, director::DirectorRepository},
    error::Error,
    esi::DirectorEsiClient,
    model::director::VerificationSummary,
    service::director::{
        event::DirectorEventSink,
        find_corporation,
        health::{HealthTracker, VerifyOutcome},
    },
};

/// Verifies every director of a corporation, healthy or not.
///
/// Directors are verified one after another to bound load against ESI and keep each failure
/// attributable to a single director in the logs.
pub struct VerificationService<'a> {
    db: &'a DatabaseConnection,
    client: &'a dyn DirectorEsiClient,
    events: &'a dyn DirectorEventSink,
}

impl<'a> VerificationService<'a> {
    /// Creates a new instance of [`VerificationService`]
    pub fn new(
        db: &'a DatabaseConnection,
        client: &'a dyn DirectorEsiClient,
        events: &'a dyn DirectorEventSink,
    ) -> Self {
        Self { db, client, events }
    }

    /// Verifies all directors of the corporation and stores the verification summary
    ///
    /// Individual director failures are counted, never returned. The corporation is marked
    /// verified when at least one director passed.
    ///
    /// # Returns
    /// - `Ok(VerificationSummary)`: Tally of verified and failed directors
    /// - `Err(DirectorError::CorporationNotFound)`: Corporation is not stored
    /// - `Err(Error::DbErr)`: Directors could not be listed or the summary could not be stored
    pub async fn verify_all(&self, corporation_id: i64) -> Result<VerificationSummary, Error> {
        let corporation = find_corporation(self.db, corporation_id).await?;

        self.verify_corporation(&corporation).await
    }

    /// Runs [`Self::verify_all`] for every corporation with at least one director
    ///
    /// A corporation whose pass fails is logged and skipped.
    ///
    /// # Returns
    /// - `Ok(usize)`: Number of corporations whose pass completed
    /// - `Err(Error::DbErr)`: Corporations with directors could not be listed
    pub async fn verify_all_corporations(&self) -> Result<usize, Error> {
        let corporation_repo = CorporationRepository::new(self.db);
        let ids = DirectorRepository::new(self.db)
            .get_corporation_ids_with_directors()
            .await?;

        let mut completed = 0;
        for id in ids {
            let corporation = match corporation_repo.find_by_id(id).await {
                Ok(Some(corporation)) => corporation,
                Ok(None) => continue,
                Err(e) => {
                    tracing::error!("Failed to load corporation with id {}: {}", id, e);
                    continue;
                }
            };

            match self.verify_corporation(&corporation).await {
                Ok(summary) => {
                    completed += 1;
                    tracing::info!(
                        corporation_id = corporation.corporation_id,
                        verified = summary.verified,
                        failed = summary.failed,
                        "Verified directors of corporation {}",
                        corporation.name
                    );
                }
                Err(e) => tracing::error!(
                    corporation_id = corporation.corporation_id,
                    "Director verification pass failed: {}",
                    e
                ),
            }
        }

        Ok(completed)
    }

    async fn verify_corporation(
        &self,
        corporation: &entity::eve_corporation::Model,
    ) -> Result<VerificationSummary, Error> {
        let directors = DirectorRepository::new(self.db)
            .find_by_corporation(corporation.id)
            .await?;
        let tracker = HealthTracker::new(self.db, self.events, corporation.corporation_id);

        let mut summary = VerificationSummary::default();
        for director in directors {
            match tracker.verify(&director, self.client).await {
                Ok(VerifyOutcome::Verified) => summary.verified += 1,
                Ok(VerifyOutcome::Failed(_)) => summary.failed += 1,
                Err(e) => {
                    tracing::error!(
                        corporation_id = corporation.corporation_id,
                        character_id = director.character_id,
                        "Failed to store director verification: {}",
                        e
                    );
                    summary.failed += 1;
                }
            }
        }

        CorporationRepository::new(self.db)
            .update_verification(corporation.id, summary.verified > 0, Utc::now().naive_utc())
            .await?;

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use eve_esi::model::enums::corporation::CorporationRole;
    use warden_test_utils::prelude::*;

    use crate::server::{
        data::corporation::CorporationRepository,
        error::{director::DirectorError, esi::EsiFailure, Error},
        model::director::VerificationSummary,
        service::director::verification::VerificationService,
        util::test::{MockDirectorEsiClient, RecordingEventSink},
    };

    /// Expect every director to be verified, healthy or not, and the tally stored
    #[tokio::test]
    async fn verifies_every_director() -> Result<(), TestError> {
        let mut test = TestBuilder::new()
            .with_director_tables()
            .with_mock_director(98000001, 1, 100)
            .with_mock_director(98000001, 2, 100)
            .with_mock_director(98000001, 3, 100)
            .build()
            .await?;
        test.director().set_health(3, false, 4).await?;
        let client = MockDirectorEsiClient::new()
            .with_roles(1, vec![CorporationRole::Director])
            .with_failure(2, EsiFailure::CredentialExpired("revoked".to_string()))
            .with_roles(3, vec![CorporationRole::Director]);
        let events = RecordingEventSink::default();

        let service = VerificationService::new(&test.db, &client, &events);
        let summary = service.verify_all(98000001).await.unwrap();

        assert_eq!(
            summary,
            VerificationSummary {
                verified: 2,
                failed: 1
            }
        );
        assert_eq!(client.calls(), vec![1, 2, 3]);

        let restored = test.director().get(3).await?.unwrap();
        assert!(restored.is_healthy);
        assert_eq!(restored.failure_count, 0);

        let corporation = CorporationRepository::new(&test.db)
            .find_by_corporation_id(98000001)
            .await?
            .unwrap();
        assert!(corporation.is_verified);
        assert!(corporation.last_verified_at.is_some());

        Ok(())
    }

    /// Expect the corporation to be unverified when every director fails
    #[tokio::test]
    async fn all_failures_mark_corporation_unverified() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_director_tables()
            .with_mock_director(98000001, 1, 100)
            .build()
            .await?;
        let client = MockDirectorEsiClient::new()
            .with_failure(1, EsiFailure::Transport("timeout".to_string()));
        let events = RecordingEventSink::default();

        let service = VerificationService::new(&test.db, &client, &events);
        let summary = service.verify_all(98000001).await.unwrap();

        assert_eq!(summary.verified, 0);
        assert_eq!(summary.failed, 1);

        let corporation = CorporationRepository::new(&test.db)
            .find_by_corporation_id(98000001)
            .await?
            .unwrap();
        assert!(!corporation.is_verified);
        assert!(corporation.last_verified_at.is_some());

        Ok(())
    }

    /// Expect an empty tally for a corporation without directors
    #[tokio::test]
    async fn empty_corporation_yields_empty_tally() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_director_tables()
            .with_mock_corporation(98000001)
            .build()
            .await?;
        let client = MockDirectorEsiClient::new();
        let events = RecordingEventSink::default();

        let service = VerificationService::new(&test.db, &client, &events);
        let summary = service.verify_all(98000001).await.unwrap();

        assert_eq!(summary, VerificationSummary::default());

        Ok(())
    }

    /// Expect an unknown corporation to be reported as not found
    #[tokio::test]
    async fn unknown_corporation_is_not_found() -> Result<(), TestError> {
        let test = TestBuilder::new().with_director_tables().build().await?;
        let client = MockDirectorEsiClient::new();
        let events = RecordingEventSink::default();

        let service = VerificationService::new(&test.db, &client, &events);
        let result = service.verify_all(98000001).await;

        assert!(matches!(
            result,
            Err(Error::DirectorError(DirectorError::CorporationNotFound(
                98000001
            )))
        ));

        Ok(())
    }

    /// Expect the sweep to verify every corporation with directors
    #[tokio::test]
    async fn sweep_covers_corporations_with_directors() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_director_tables()
            .with_mock_corporation(98000003)
            .with_mock_director(98000001, 1, 100)
            .with_mock_director(98000002, 2, 100)
            .build()
            .await?;
        let client = MockDirectorEsiClient::new()
            .with_roles(1, vec![CorporationRole::Director])
            .with_roles(2, vec![CorporationRole::Director]);
        let events = RecordingEventSink::default();

        let service = VerificationService::new(&test.db, &client, &events);
        let completed = service.verify_all_corporations().await.unwrap();

        assert_eq!(completed, 2);
        assert_eq!(client.calls(), vec![1, 2]);

        let untouched = CorporationRepository::new(&test.db)
            .find_by_corporation_id(98000003)
            .await?
            .unwrap();
        assert_eq!(untouched.last_verified_at, None);

        Ok(())
    }
}
