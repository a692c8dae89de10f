//! Response documents for the account age service

use serde::{Deserialize, Serialize};

/// Normalized account profile with derived age data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedProfile {
    pub id: String,
    pub username: String,
    pub display_name: String,
    /// `username@instance`
    pub handle: String,
    pub instance: String,
    /// Upstream creation timestamp, RFC 3339
    pub created_at: String,
    pub estimated_creation_date: String,
    pub account_age: String,
    pub age_days: i64,
    pub verified: String,
    pub bot: bool,
    pub locked: bool,
    pub description: String,
    pub followers: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub following: Option<u64>,
    pub posts: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_status_at: Option<String>,
    pub avatar: String,
    pub profile_link: String,
    pub region: String,
    pub estimation_confidence: String,
    pub accuracy_range: String,
}

/// Body returned when a bare username exists on several instances
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultipleMatches {
    pub users: Vec<FormattedProfile>,
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Current time, ISO 8601
    pub timestamp: String,
    pub uptime_secs: u64,
}
