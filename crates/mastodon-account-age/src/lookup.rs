//! Account lookup across one or many instances

use async_trait::async_trait;
use futures::future::join_all;
use mastodon_api::{Account, LookupResult, MastodonClient};

use crate::error::AppError;
use crate::handle::LookupTarget;

/// Looks up a username on a single instance
#[async_trait]
pub trait AccountLookup: Send + Sync {
    async fn lookup(&self, username: &str, instance: &str) -> LookupResult;
}

#[async_trait]
impl AccountLookup for MastodonClient {
    async fn lookup(&self, username: &str, instance: &str) -> LookupResult {
        MastodonClient::lookup(self, username, instance).await
    }
}

/// An account and the instance it was found on
#[derive(Debug, Clone)]
pub struct Found {
    pub account: Account,
    pub instance: String,
}

/// Accounts matching a lookup
#[derive(Debug)]
pub enum Matches {
    One(Found),
    /// The same username exists on several instances, in configured order
    Many(Vec<Found>),
}

/// Find the account(s) a handle refers to
///
/// A full handle queries its own instance only. A bare username queries every
/// instance in `instances` concurrently and waits for all of them; individual
/// failures are only reported if no instance has the account.
pub async fn find_account(
    lookup: &dyn AccountLookup,
    target: &LookupTarget,
    instances: &[String],
) -> Result<Matches, AppError> {
    match target {
        LookupTarget::Instance { username, instance } => {
            find_on_instance(lookup, username, instance).await
        }
        LookupTarget::AllInstances { username } => {
            find_on_all_instances(lookup, username, instances).await
        }
    }
}

async fn find_on_instance(
    lookup: &dyn AccountLookup,
    username: &str,
    instance: &str,
) -> Result<Matches, AppError> {
    let result = lookup.lookup(username, instance).await;

    if let Err(ref e) = result.outcome {
        if !e.is_not_found() {
            return Err(AppError::Upstream {
                status: e.status(),
                details: e.to_string(),
                instances: vec![instance.to_string()],
            });
        }
    }

    match result.into_account() {
        Some(account) => Ok(Matches::One(Found {
            account,
            instance: instance.to_string(),
        })),
        None => Err(not_found_on_instance(username, instance)),
    }
}

async fn find_on_all_instances(
    lookup: &dyn AccountLookup,
    username: &str,
    instances: &[String],
) -> Result<Matches, AppError> {
    let results = join_all(
        instances
            .iter()
            .map(|instance| lookup.lookup(username, instance)),
    )
    .await;

    let mut found: Vec<Found> = results
        .into_iter()
        .filter_map(|result| {
            let instance = result.instance.clone();
            result
                .into_account()
                .map(|account| Found { account, instance })
        })
        .collect();

    match found.len() {
        0 => Err(AppError::NotFound {
            message: format!(
                "User '{}' not found on any of the searched instances: {}",
                username,
                instances.join(", ")
            ),
            instances: instances.to_vec(),
        }),
        1 => Ok(Matches::One(found.remove(0))),
        _ => Ok(Matches::Many(found)),
    }
}

fn not_found_on_instance(username: &str, instance: &str) -> AppError {
    AppError::NotFound {
        message: format!("User @{}@{} not found on {}", username, instance, instance),
        instances: vec![instance.to_string()],
    }
}
