//! Error types for the Mastodon API client

use std::fmt;

/// Errors that can occur when looking up an account on a Mastodon instance
#[derive(Debug)]
pub enum MastodonError {
    /// The instance answered 404 or 403 (unknown or suspended account)
    NotFound(u16),
    /// The instance answered with some other non-success status
    Status(u16, String),
    /// Transport failure, including timeouts
    Http(reqwest::Error),
    /// The response body was not a valid account record
    Json(serde_json::Error),
}

impl MastodonError {
    /// HTTP status reported by the instance, if it answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound(status) | Self::Status(status, _) => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Json(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}

impl fmt::Display for MastodonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(status) => write!(f, "Account not found (status {})", status),
            Self::Status(status, msg) => write!(f, "Instance returned status {}: {}", status, msg),
            Self::Http(e) if e.is_timeout() => write!(f, "Request timed out: {}", e),
            Self::Http(e) => write!(f, "HTTP error: {}", e),
            Self::Json(e) => write!(f, "Malformed account data: {}", e),
        }
    }
}

impl std::error::Error for MastodonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for MastodonError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<serde_json::Error> for MastodonError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Result type for Mastodon API operations
pub type Result<T> = std::result::Result<T, MastodonError>;
