//! Director health state machine.
//!
//! A director is either healthy or unhealthy. Failures raise its failure count and mark it
//! unhealthy once [`FAILURE_THRESHOLD`] is reached. Successful use lowers the count by one and
//! only restores an unhealthy director when the count is back at zero, so a director which
//! failed [`FAILURE_THRESHOLD`] times needs [`RECOVERY_THRESHOLD`] successes to be selectable
//! again. An explicit verification is authoritative and restores the director immediately.

use chrono::{NaiveDateTime, Utc};
use dioxus_logger::tracing;
use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};

use crate::server::{
    data::{director::DirectorRepository, director_role::DirectorRoleRepository},
    error::{esi::EsiFailure, Error},
    esi::DirectorEsiClient,
    model::director::DirectorHealth,
    service::director::event::{DirectorEvent, DirectorEventSink},
};

/// Consecutive net failures after which a director is marked unhealthy
pub const FAILURE_THRESHOLD: i32 = 3;

/// Successes needed to restore a director which went unhealthy at [`FAILURE_THRESHOLD`]
pub const RECOVERY_THRESHOLD: i32 = 3;

/// Health after a successful live request.
pub fn after_success(health: &DirectorHealth) -> DirectorHealth {
    let failure_count = (health.failure_count - 1).max(0);

    if !health.is_healthy && failure_count == 0 {
        return DirectorHealth {
            is_healthy: true,
            failure_count,
            last_failure_reason: None,
        };
    }

    DirectorHealth {
        is_healthy: health.is_healthy,
        failure_count,
        last_failure_reason: health.last_failure_reason.clone(),
    }
}

/// Health after a failed request.
pub fn after_failure(health: &DirectorHealth, reason: &str) -> DirectorHealth {
    let failure_count = health.failure_count.saturating_add(1);

    DirectorHealth {
        is_healthy: health.is_healthy && failure_count < FAILURE_THRESHOLD,
        failure_count,
        last_failure_reason: Some(reason.to_string()),
    }
}

/// Health after a successful verification, regardless of prior state.
pub fn after_verification() -> DirectorHealth {
    DirectorHealth {
        is_healthy: true,
        failure_count: 0,
        last_failure_reason: None,
    }
}

/// Outcome of verifying a single director.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Round trip succeeded, the director is healthy with no failures
    Verified,
    /// Round trip failed and the failure was recorded on the director
    Failed(EsiFailure),
}

/// Applies and persists health transitions for directors of one corporation.
///
/// Every transition re-reads the director inside a transaction holding a row lock, so concurrent
/// outcomes recorded for the same director are applied one after the other.
pub struct HealthTracker<'a> {
    db: &'a DatabaseConnection,
    events: &'a dyn DirectorEventSink,
    corporation_id: i64,
}

impl<'a> HealthTracker<'a> {
    /// Creates a new instance of [`HealthTracker`] for the EVE corporation `corporation_id`
    pub fn new(
        db: &'a DatabaseConnection,
        events: &'a dyn DirectorEventSink,
        corporation_id: i64,
    ) -> Self {
        Self {
            db,
            events,
            corporation_id,
        }
    }

    /// Records a successful live request made with the director and stamps `last_used`
    pub async fn record_success(
        &self,
        director_id: i32,
    ) -> Result<entity::corporation_director::Model, Error> {
        let now = Utc::now().naive_utc();

        let txn = self.db.begin().await?;
        let director_repo = DirectorRepository::new(&txn);

        let director = find_locked(&director_repo, director_id).await?;
        let health = after_success(&DirectorHealth::from(&director));
        let recovered = !director.is_healthy && health.is_healthy;

        let updated = director_repo
            .update_health(director_id, health, Some(now), None)
            .await?;
        txn.commit().await?;

        if recovered {
            self.events.emit(DirectorEvent::CredentialRecovered {
                corporation_id: self.corporation_id,
                character_id: updated.character_id,
            });
        }

        Ok(updated)
    }

    /// Records a failed request made with the director
    pub async fn record_failure(
        &self,
        director_id: i32,
        reason: &str,
    ) -> Result<entity::corporation_director::Model, Error> {
        self.apply_failure(director_id, reason, None).await
    }

    /// Verifies the director with one authenticated round trip
    ///
    /// On success the director's role snapshot is stored and it is marked healthy with no
    /// failures. On failure the failure is recorded as with [`Self::record_failure`]. Either way
    /// `last_health_check` is stamped.
    ///
    /// # Returns
    /// - `Ok(VerifyOutcome)`: The outcome was persisted
    /// - `Err(Error)`: Persisting the outcome failed
    pub async fn verify(
        &self,
        director: &entity::corporation_director::Model,
        client: &dyn DirectorEsiClient,
    ) -> Result<VerifyOutcome, Error> {
        let now = Utc::now().naive_utc();

        let roles = match client.get_character_roles(director.character_id).await {
            Ok(roles) => roles,
            Err(failure) => {
                tracing::debug!(
                    corporation_id = self.corporation_id,
                    character_id = director.character_id,
                    "Director verification failed: {}",
                    failure
                );

                self.apply_failure(director.id, &failure.to_string(), Some(now))
                    .await?;

                return Ok(VerifyOutcome::Failed(failure));
            }
        };

        let roles = serde_json::to_string(&roles).map_err(|e| Error::ParseError(e.to_string()))?;

        let txn = self.db.begin().await?;
        let director_repo = DirectorRepository::new(&txn);

        DirectorRoleRepository::new(&txn)
            .upsert(director.corporation_id, director.character_id, roles)
            .await?;

        let current = find_locked(&director_repo, director.id).await?;
        director_repo
            .update_health(director.id, after_verification(), None, Some(now))
            .await?;
        txn.commit().await?;

        if !current.is_healthy {
            self.events.emit(DirectorEvent::CredentialRecovered {
                corporation_id: self.corporation_id,
                character_id: current.character_id,
            });
        }

        Ok(VerifyOutcome::Verified)
    }

    async fn apply_failure(
        &self,
        director_id: i32,
        reason: &str,
        checked_at: Option<NaiveDateTime>,
    ) -> Result<entity::corporation_director::Model, Error> {
        let txn = self.db.begin().await?;
        let director_repo = DirectorRepository::new(&txn);

        let director = find_locked(&director_repo, director_id).await?;
        let health = after_failure(&DirectorHealth::from(&director), reason);
        let marked_unhealthy = director.is_healthy && !health.is_healthy;

        let updated = director_repo
            .update_health(director_id, health, None, checked_at)
            .await?;

        let remaining_healthy = if marked_unhealthy {
            Some(director_repo.count_healthy(updated.corporation_id).await?)
        } else {
            None
        };
        txn.commit().await?;

        if marked_unhealthy {
            self.events.emit(DirectorEvent::CredentialMarkedUnhealthy {
                corporation_id: self.corporation_id,
                character_id: updated.character_id,
                failure_count: updated.failure_count,
                reason: reason.to_string(),
            });
        }

        if remaining_healthy == Some(0) {
            self.events.emit(DirectorEvent::AllCredentialsUnhealthy {
                corporation_id: self.corporation_id,
            });
        }

        Ok(updated)
    }
}

async fn find_locked<C: sea_orm::ConnectionTrait>(
    director_repo: &DirectorRepository<'_, C>,
    director_id: i32,
) -> Result<entity::corporation_director::Model, Error> {
    director_repo
        .find_by_id_for_update(director_id)
        .await?
        .ok_or_else(|| {
            Error::DbErr(DbErr::RecordNotFound(format!(
                "corporation_director with id {}",
                director_id
            )))
        })
}

#[cfg(test)]
mod tests {
    mod transitions {
        use crate::server::{
            model::director::DirectorHealth,
            service::director::health::{
                after_failure, after_success, after_verification, FAILURE_THRESHOLD,
                RECOVERY_THRESHOLD,
            },
        };

        fn healthy() -> DirectorHealth {
            DirectorHealth {
                is_healthy: true,
                failure_count: 0,
                last_failure_reason: None,
            }
        }

        /// Expect the director to flip unhealthy on exactly the threshold-th failure
        #[test]
        fn failure_threshold_flips_on_third_failure() {
            let mut health = healthy();

            for count in 1..FAILURE_THRESHOLD {
                health = after_failure(&health, "timeout");
                assert!(health.is_healthy, "flipped early at failure {}", count);
                assert_eq!(health.failure_count, count);
            }

            health = after_failure(&health, "timeout");
            assert!(!health.is_healthy);
            assert_eq!(health.failure_count, FAILURE_THRESHOLD);
            assert_eq!(health.last_failure_reason.as_deref(), Some("timeout"));
        }

        /// Expect recovery only after the failure count drains back to zero
        #[test]
        fn additive_recovery_needs_three_successes() {
            let mut health = DirectorHealth {
                is_healthy: false,
                failure_count: 3,
                last_failure_reason: Some("expired".to_string()),
            };

            for step in 1..RECOVERY_THRESHOLD {
                health = after_success(&health);
                assert!(!health.is_healthy, "recovered early at success {}", step);
                assert_eq!(health.failure_count, 3 - step);
                assert_eq!(health.last_failure_reason.as_deref(), Some("expired"));
            }

            health = after_success(&health);
            assert!(health.is_healthy);
            assert_eq!(health.failure_count, 0);
            assert_eq!(health.last_failure_reason, None);
        }

        /// Expect the failure count to never drop below zero
        #[test]
        fn success_floors_count_at_zero() {
            let health = after_success(&after_success(&healthy()));

            assert_eq!(health, healthy());
        }

        /// Expect a success on a healthy director to keep its last failure reason
        #[test]
        fn success_on_healthy_director_keeps_reason() {
            let health = after_failure(&healthy(), "timeout");
            let health = after_success(&health);

            assert!(health.is_healthy);
            assert_eq!(health.failure_count, 0);
            assert_eq!(health.last_failure_reason.as_deref(), Some("timeout"));
        }

        /// Expect failures on an unhealthy director to keep it unhealthy
        #[test]
        fn failure_keeps_unhealthy_director_unhealthy() {
            let health = DirectorHealth {
                is_healthy: false,
                failure_count: 1,
                last_failure_reason: Some("old".to_string()),
            };

            let health = after_failure(&health, "new");

            assert!(!health.is_healthy);
            assert_eq!(health.failure_count, 2);
            assert_eq!(health.last_failure_reason.as_deref(), Some("new"));
        }

        /// Expect verification to reset any state
        #[test]
        fn verification_resets_state() {
            assert_eq!(after_verification(), healthy());
        }
    }

    mod record_failure {
        use warden_test_utils::prelude::*;

        use crate::server::{
            service::director::{
                event::DirectorEvent,
                health::{HealthTracker, FAILURE_THRESHOLD},
            },
            util::test::RecordingEventSink,
        };

        /// Expect unhealthy and all-unhealthy events once the only director crosses the threshold
        #[tokio::test]
        async fn emits_events_when_last_director_unhealthy() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_director_tables().build().await?;
            let director = test.director().insert_mock_director(98000001, 1, 100).await?;
            let events = RecordingEventSink::default();

            let tracker = HealthTracker::new(&test.db, &events, 98000001);
            for _ in 0..FAILURE_THRESHOLD {
                tracker.record_failure(director.id, "expired").await.unwrap();
            }

            let stored = test.director().get(director.id).await?.unwrap();
            assert!(!stored.is_healthy);
            assert_eq!(stored.failure_count, 3);
            assert_eq!(stored.last_used, None);
            assert_eq!(
                events.events(),
                vec![
                    DirectorEvent::CredentialMarkedUnhealthy {
                        corporation_id: 98000001,
                        character_id: 1,
                        failure_count: 3,
                        reason: "expired".to_string(),
                    },
                    DirectorEvent::AllCredentialsUnhealthy {
                        corporation_id: 98000001
                    },
                ]
            );

            Ok(())
        }

        /// Expect no all-unhealthy event while another director is healthy
        #[tokio::test]
        async fn no_alert_while_other_director_healthy() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_director_tables().build().await?;
            let director = test.director().insert_mock_director(98000001, 1, 100).await?;
            test.director().insert_mock_director(98000001, 2, 100).await?;
            test.director().set_health(director.id, true, 2).await?;
            let events = RecordingEventSink::default();

            let tracker = HealthTracker::new(&test.db, &events, 98000001);
            tracker.record_failure(director.id, "expired").await.unwrap();

            let recorded = events.events();
            assert_eq!(recorded.len(), 1);
            assert!(matches!(
                recorded[0],
                DirectorEvent::CredentialMarkedUnhealthy { character_id: 1, .. }
            ));

            Ok(())
        }

        /// Expect concurrent failures on the same director to all be counted
        #[tokio::test]
        async fn concurrent_failures_are_not_lost() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_director_tables().build().await?;
            let director = test.director().insert_mock_director(98000001, 1, 100).await?;
            let events = RecordingEventSink::default();

            let tracker = HealthTracker::new(&test.db, &events, 98000001);
            let (a, b) = tokio::join!(
                tracker.record_failure(director.id, "a"),
                tracker.record_failure(director.id, "b"),
            );
            assert!(a.is_ok() && b.is_ok());

            let stored = test.director().get(director.id).await?.unwrap();
            assert_eq!(stored.failure_count, 2);
            assert!(stored.is_healthy);

            Ok(())
        }
    }

    mod record_success {
        use warden_test_utils::prelude::*;

        use crate::server::{
            service::director::{event::DirectorEvent, health::HealthTracker},
            util::test::RecordingEventSink,
        };

        /// Expect last used to be stamped and the count lowered without recovering
        #[tokio::test]
        async fn stamps_last_used_and_decrements() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_director_tables().build().await?;
            let director = test.director().insert_mock_director(98000001, 1, 100).await?;
            test.director().set_health(director.id, false, 3).await?;
            let events = RecordingEventSink::default();

            let tracker = HealthTracker::new(&test.db, &events, 98000001);
            let updated = tracker.record_success(director.id).await.unwrap();

            assert!(!updated.is_healthy);
            assert_eq!(updated.failure_count, 2);
            assert!(updated.last_used.is_some());
            assert!(events.events().is_empty());

            Ok(())
        }

        /// Expect a recovered event when the count drains to zero
        #[tokio::test]
        async fn emits_recovered_event() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_director_tables().build().await?;
            let director = test.director().insert_mock_director(98000001, 1, 100).await?;
            test.director().set_health(director.id, false, 1).await?;
            let events = RecordingEventSink::default();

            let tracker = HealthTracker::new(&test.db, &events, 98000001);
            let updated = tracker.record_success(director.id).await.unwrap();

            assert!(updated.is_healthy);
            assert_eq!(updated.last_failure_reason, None);
            assert_eq!(
                events.events(),
                vec![DirectorEvent::CredentialRecovered {
                    corporation_id: 98000001,
                    character_id: 1
                }]
            );

            Ok(())
        }
    }

    mod verify {
        use eve_esi::model::enums::corporation::CorporationRole;
        use warden_test_utils::prelude::*;

        use crate::server::{
            data::director_role::DirectorRoleRepository,
            error::esi::EsiFailure,
            service::director::{
                event::DirectorEvent,
                health::{HealthTracker, VerifyOutcome},
            },
            util::test::{MockDirectorEsiClient, RecordingEventSink},
        };

        /// Expect a single verification to fully restore a badly failing director
        #[tokio::test]
        async fn verification_is_authoritative() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_director_tables().build().await?;
            let director = test.director().insert_mock_director(98000001, 1, 100).await?;
            let director = test.director().set_health(director.id, false, 5).await?;
            let client =
                MockDirectorEsiClient::new().with_roles(1, vec![CorporationRole::Director]);
            let events = RecordingEventSink::default();

            let tracker = HealthTracker::new(&test.db, &events, 98000001);
            let outcome = tracker.verify(&director, &client).await.unwrap();

            assert_eq!(outcome, VerifyOutcome::Verified);
            let stored = test.director().get(director.id).await?.unwrap();
            assert!(stored.is_healthy);
            assert_eq!(stored.failure_count, 0);
            assert_eq!(stored.last_failure_reason, None);
            assert!(stored.last_health_check.is_some());
            assert_eq!(stored.last_used, None);

            let snapshot = DirectorRoleRepository::new(&test.db)
                .find(director.corporation_id, 1)
                .await?
                .unwrap();
            assert!(snapshot.roles.contains("Director"));
            assert_eq!(
                events.events(),
                vec![DirectorEvent::CredentialRecovered {
                    corporation_id: 98000001,
                    character_id: 1
                }]
            );

            Ok(())
        }

        /// Expect a failed verification to be recorded like any other failure
        #[tokio::test]
        async fn failed_verification_records_failure() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_director_tables().build().await?;
            let director = test.director().insert_mock_director(98000001, 1, 100).await?;
            let failure = EsiFailure::PermissionDenied("missing role".to_string());
            let client = MockDirectorEsiClient::new().with_failure(1, failure.clone());
            let events = RecordingEventSink::default();

            let tracker = HealthTracker::new(&test.db, &events, 98000001);
            let outcome = tracker.verify(&director, &client).await.unwrap();

            assert_eq!(outcome, VerifyOutcome::Failed(failure.clone()));
            let stored = test.director().get(director.id).await?.unwrap();
            assert!(stored.is_healthy);
            assert_eq!(stored.failure_count, 1);
            assert_eq!(stored.last_failure_reason, Some(failure.to_string()));
            assert!(stored.last_health_check.is_some());

            Ok(())
        }
    }
}
