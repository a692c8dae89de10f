//! Handle parsing and validation
//!
//! A handle is either `username` or `username@instance`.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::AppError;

static HANDLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_]{3,30}(@[A-Za-z0-9.-]+\.[A-Za-z]{2,})?$").unwrap()
});

/// Where to look for an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupTarget {
    /// Full handle: query exactly this instance
    Instance { username: String, instance: String },
    /// Bare username: query every configured instance
    AllInstances { username: String },
}

impl LookupTarget {
    pub fn username(&self) -> &str {
        match self {
            LookupTarget::Instance { username, .. } | LookupTarget::AllInstances { username } => {
                username
            }
        }
    }
}

/// Validate a handle and decide which instances to query
pub fn resolve_handle(handle: &str) -> Result<LookupTarget, AppError> {
    if handle.is_empty() {
        return Err(AppError::BadRequest("Handle is required".to_string()));
    }

    if !HANDLE_RE.is_match(handle) {
        return Err(AppError::BadRequest(
            "Invalid handle format. Use 'username' or 'username@instance.domain'".to_string(),
        ));
    }

    Ok(match handle.split_once('@') {
        Some((username, instance)) => LookupTarget::Instance {
            username: username.to_string(),
            instance: instance.to_string(),
        },
        None => LookupTarget::AllInstances {
            username: handle.to_string(),
        },
    })
}
