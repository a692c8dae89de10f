//! Mastodon API HTTP client

use crate::error::{MastodonError, Result};
use crate::types::{Account, ErrorBody, LookupResult};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// Longest slice of a non-JSON error body kept in an error message
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Client for the public account endpoints of Mastodon instances
///
/// One client serves every instance; the instance hostname is passed per call.
pub struct MastodonClient {
    http: reqwest::Client,
    scheme: String,
}

impl MastodonClient {
    /// Timeout applied to every lookup
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
    /// User agent sent to instances
    pub const USER_AGENT: &'static str = "mastodon-account-age/0.1";

    /// Create a new client with default settings (5 second timeout, HTTPS)
    pub fn new() -> Self {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    /// Create a new client with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(Self::USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            scheme: "https".to_string(),
        }
    }

    /// Use a different URL scheme, e.g. `http` for a local instance
    pub fn with_scheme(mut self, scheme: &str) -> Self {
        self.scheme = scheme.to_string();
        self
    }

    /// URL of the account lookup endpoint for `username` on `instance`
    pub fn lookup_url(&self, username: &str, instance: &str) -> String {
        format!(
            "{}://{}/api/v1/accounts/lookup?acct={}",
            self.scheme,
            instance,
            urlencoding::encode(username)
        )
    }

    /// Look up `username` on `instance`
    ///
    /// Never fails: transport errors, timeouts, error statuses and malformed
    /// bodies are returned in [`LookupResult::outcome`].
    pub async fn lookup(&self, username: &str, instance: &str) -> LookupResult {
        let outcome = self.fetch_account(username, instance).await;

        if let Err(ref e) = outcome {
            debug!(username, instance, error = %e, "Account lookup failed");
        }

        LookupResult {
            instance: instance.to_string(),
            outcome,
        }
    }

    async fn fetch_account(&self, username: &str, instance: &str) -> Result<Account> {
        let url = self.lookup_url(username, instance);
        debug!(url = %url, "Looking up Mastodon account");

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND || status == StatusCode::FORBIDDEN {
            return Err(MastodonError::NotFound(status.as_u16()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MastodonError::Status(
                status.as_u16(),
                error_message(status, &body),
            ));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl Default for MastodonClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Best human-readable message for an error response
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.error;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string();
    }

    trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
