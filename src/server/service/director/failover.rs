use std::future::Future;

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::director::DirectorRepository,
    error::{director::DirectorError, esi::EsiFailure, Error},
    service::director::{
        event::{DirectorEvent, DirectorEventSink},
        find_corporation,
        health::HealthTracker,
        selector::DirectorSelector,
    },
};

/// Runs authenticated operations against the healthy directors of a corporation until one
/// succeeds.
///
/// Candidates are tried one at a time in selection order. Each outcome is persisted on the
/// director before the next candidate is tried, so the set of healthy directors shrinks as
/// failures accumulate and no separate attempt limit is needed.
pub struct FailoverCoordinator<'a> {
    db: &'a DatabaseConnection,
    events: &'a dyn DirectorEventSink,
}

impl<'a> FailoverCoordinator<'a> {
    /// Creates a new instance of [`FailoverCoordinator`]
    pub fn new(db: &'a DatabaseConnection, events: &'a dyn DirectorEventSink) -> Self {
        Self { db, events }
    }

    /// Executes `operation` with the character ID of each healthy director in turn
    ///
    /// # Arguments
    /// - `corporation_id`: EVE Online corporation ID
    /// - `operation`: Authenticated request to perform as the provided director character
    ///
    /// # Returns
    /// - `Ok(T)`: Result of the first director whose request succeeded
    /// - `Err(DirectorError::CorporationNotFound)`: Corporation is not stored
    /// - `Err(DirectorError::NotConfigured)`: Corporation has no directors at all
    /// - `Err(DirectorError::NoHealthyCredentials)`: Directors exist but none are healthy
    /// - `Err(DirectorError::AllCandidatesFailed)`: Every healthy director failed, carries the
    ///   last failure
    /// - `Err(Error::DbErr)`: A failure could not be recorded
    ///
    /// # Example
    ///
    /// ```ignore
    /// let coordinator = FailoverCoordinator::new(&db, &events);
    ///
    /// let roles = coordinator
    ///     .execute_with_failover(98000001, |character_id| {
    ///         let client = client.clone();
    ///         async move { client.get_character_roles(character_id).await }
    ///     })
    ///     .await?;
    /// ```
    pub async fn execute_with_failover<T, F, Fut>(
        &self,
        corporation_id: i64,
        operation: F,
    ) -> Result<T, Error>
    where
        F: Fn(i64) -> Fut,
        Fut: Future<Output = Result<T, EsiFailure>>,
    {
        let corporation = find_corporation(self.db, corporation_id).await?;
        let candidates = DirectorSelector::new(self.db)
            .list_healthy(corporation.id)
            .await?;

        if candidates.is_empty() {
            let registered = DirectorRepository::new(self.db)
                .count_by_corporation(corporation.id)
                .await?;

            if registered == 0 {
                return Err(DirectorError::NotConfigured(corporation_id).into());
            }

            self.events
                .emit(DirectorEvent::AllCredentialsUnhealthy { corporation_id });

            return Err(DirectorError::NoHealthyCredentials(corporation_id).into());
        }

        let tracker = HealthTracker::new(self.db, self.events, corporation_id);
        let mut last_error = None;
        let mut attempts = 0;

        for director in candidates {
            attempts += 1;

            match operation(director.character_id).await {
                Ok(result) => {
                    // The request itself succeeded, a lost timestamp update must not fail it
                    if let Err(e) = tracker.record_success(director.id).await {
                        tracing::warn!(
                            corporation_id,
                            character_id = director.character_id,
                            "Failed to record director success: {}",
                            e
                        );
                    }

                    if attempts > 1 {
                        tracing::debug!(
                            corporation_id,
                            character_id = director.character_id,
                            "Director request succeeded after {} attempts",
                            attempts
                        );
                    }

                    return Ok(result);
                }
                Err(failure) => {
                    let reason = failure.to_string();

                    self.events.emit(DirectorEvent::CandidateAttemptFailed {
                        corporation_id,
                        character_id: director.character_id,
                        attempt: attempts,
                        reason: reason.clone(),
                    });

                    tracker.record_failure(director.id, &reason).await?;
                    last_error = Some(reason);
                }
            }
        }

        tracing::error!(
            corporation_id,
            "All {} healthy directors failed the request",
            attempts
        );

        Err(DirectorError::AllCandidatesFailed {
            corporation_id,
            attempts,
            last_error: last_error.unwrap_or_default(),
        }
        .into())
    }
}
