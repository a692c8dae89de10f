//! Mastodon API data types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MastodonError;

/// Account record as returned by `GET /api/v1/accounts/lookup`
///
/// Only the fields this crate reads are modelled; everything else in the
/// upstream payload is ignored. `created_at`, `note` and the follower/status
/// counts are required, the rest may be missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub acct: Option<String>,
    #[serde(default)]
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub followers_count: u64,
    #[serde(default)]
    pub following_count: Option<u64>,
    pub statuses_count: u64,
    #[serde(default)]
    pub bot: bool,
    #[serde(default)]
    pub locked: bool,
    /// Profile bio as HTML
    pub note: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub avatar_static: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Date (not timestamp) of the most recent post
    #[serde(default)]
    pub last_status_at: Option<String>,
}

/// Outcome of looking up one username on one instance
#[derive(Debug)]
pub struct LookupResult {
    pub instance: String,
    pub outcome: Result<Account, MastodonError>,
}

impl LookupResult {
    /// The account, if the lookup produced one with a usable identifier
    pub fn account(&self) -> Option<&Account> {
        self.outcome.as_ref().ok().filter(|a| has_identifier(a))
    }

    /// Owned variant of [`LookupResult::account`]
    pub fn into_account(self) -> Option<Account> {
        self.outcome.ok().filter(has_identifier)
    }
}

fn has_identifier(account: &Account) -> bool {
    !account.id.is_empty()
}

/// Error body Mastodon returns alongside non-success statuses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,
}
