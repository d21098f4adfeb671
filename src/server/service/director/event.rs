//! Observable director health events.
//!
//! The health tracker and failover coordinator emit [`DirectorEvent`]s to a
//! [`DirectorEventSink`] instead of logging directly, allowing the surrounding service to route
//! them to alerting. [`TracingEventSink`] is the default sink used by the server.

use dioxus_logger::tracing;

/// Director health event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectorEvent {
    /// A single candidate failed during failover, the next candidate will be tried
    CandidateAttemptFailed {
        /// EVE Online corporation ID
        corporation_id: i64,
        /// Character ID of the failed director
        character_id: i64,
        /// 1-based position of the candidate within the failover pass
        attempt: usize,
        /// Failure message recorded on the director
        reason: String,
    },
    /// A director crossed the failure threshold and is excluded from selection
    CredentialMarkedUnhealthy {
        /// EVE Online corporation ID
        corporation_id: i64,
        /// Character ID of the director
        character_id: i64,
        /// Failure count after the transition
        failure_count: i32,
        /// Failure message recorded on the director
        reason: String,
    },
    /// A previously unhealthy director is selectable again
    CredentialRecovered {
        /// EVE Online corporation ID
        corporation_id: i64,
        /// Character ID of the director
        character_id: i64,
    },
    /// No director of the corporation is healthy, authenticated access is lost
    AllCredentialsUnhealthy {
        /// EVE Online corporation ID
        corporation_id: i64,
    },
}

/// Receiver of [`DirectorEvent`]s.
pub trait DirectorEventSink: Send + Sync {
    /// Handle a single event. Must not block.
    fn emit(&self, event: DirectorEvent);
}

/// Event sink writing every event as a log line.
///
/// [`DirectorEvent::AllCredentialsUnhealthy`] is logged at error level as it requires an
/// operator to add or re-authorize a director.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingEventSink;

impl DirectorEventSink for TracingEventSink {
    fn emit(&self, event: DirectorEvent) {
        match event {
            DirectorEvent::CandidateAttemptFailed {
                corporation_id,
                character_id,
                attempt,
                reason,
            } => tracing::warn!(
                corporation_id,
                character_id,
                attempt,
                "Director attempt failed, trying next director: {}",
                reason
            ),
            DirectorEvent::CredentialMarkedUnhealthy {
                corporation_id,
                character_id,
                failure_count,
                reason,
            } => tracing::warn!(
                corporation_id,
                character_id,
                failure_count,
                "Director marked unhealthy: {}",
                reason
            ),
            DirectorEvent::CredentialRecovered {
                corporation_id,
                character_id,
            } => tracing::info!(corporation_id, character_id, "Director recovered"),
            DirectorEvent::AllCredentialsUnhealthy { corporation_id } => tracing::error!(
                corporation_id,
                "All directors of corporation {} are unhealthy, authenticated ESI access lost",
                corporation_id
            ),
        }
    }
}
