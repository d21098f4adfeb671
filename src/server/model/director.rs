//! Director domain values passed between the health tracker and the data layer.

/// Mutable health fields of a single director.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectorHealth {
    /// Unhealthy directors are excluded from selection
    pub is_healthy: bool,
    /// Net consecutive failures, never negative
    pub failure_count: i32,
    /// Diagnostic of the most recent failure, cleared on recovery
    pub last_failure_reason: Option<String>,
}

impl From<&entity::corporation_director::Model> for DirectorHealth {
    fn from(director: &entity::corporation_director::Model) -> Self {
        Self {
            is_healthy: director.is_healthy,
            failure_count: director.failure_count,
            last_failure_reason: director.last_failure_reason.clone(),
        }
    }
}

/// Tally of a verification pass over every director of a corporation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VerificationSummary {
    /// Directors whose verification round trip succeeded
    pub verified: usize,
    /// Directors whose verification round trip failed
    pub failed: usize,
}
