//! Rust client for the Mastodon public account API
//!
//! Looks up accounts by username on any Mastodon-compatible instance using the
//! unauthenticated `GET /api/v1/accounts/lookup` endpoint.
//!
//! # Example
//!
//! ```no_run
//! use mastodon_api::MastodonClient;
//!
//! # async fn example() {
//! let client = MastodonClient::new();
//!
//! let result = client.lookup("Gargron", "mastodon.social").await;
//! match result.outcome {
//!     Ok(account) => println!("{} joined {}", account.username, account.created_at),
//!     Err(e) => println!("lookup on {} failed: {}", result.instance, e),
//! }
//! # }
//! ```
//!
//! Lookups never return early with an error: every failure is captured in the
//! returned [`LookupResult`] together with the instance it came from, so a
//! caller querying several instances always gets one result per instance.

mod client;
mod error;
mod types;

pub use client::MastodonClient;
pub use error::{MastodonError, Result};
pub use types::{Account, LookupResult};
