use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A director character registered for a corporation
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, utoipa::ToSchema)]
pub struct DirectorDto {
    pub id: i32,
    pub character_id: i64,
    pub character_name: String,
    /// Lower values are preferred during selection
    pub priority: i32,
    pub is_healthy: bool,
    pub failure_count: i32,
    pub last_failure_reason: Option<String>,
    pub last_health_check: Option<NaiveDateTime>,
    pub last_used: Option<NaiveDateTime>,
}

/// Request body for registering a new director
#[derive(Serialize, Deserialize, Debug, Clone, utoipa::ToSchema)]
pub struct AddDirectorDto {
    pub character_id: i64,
    /// Fetched from ESI when omitted
    pub character_name: Option<String>,
    /// Defaults to 100
    pub priority: Option<i32>,
    /// SSO refresh token used for authenticated requests as this director
    pub refresh_token: Option<String>,
}

/// Request body for changing a director's selection priority
#[derive(Serialize, Deserialize, Debug, Clone, utoipa::ToSchema)]
pub struct UpdatePriorityDto {
    pub priority: i32,
}

/// Tally of a verification pass over every director of a corporation
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, utoipa::ToSchema)]
pub struct VerificationSummaryDto {
    pub verified: usize,
    pub failed: usize,
}
