//! Mastodon Account Age Service
//!
//! Looks up Mastodon accounts by handle across federated instances and reports
//! how old each account is.

mod config;
mod error;
mod format;
mod handle;
mod lookup;
mod server;
mod types;

use crate::config::Config;
use crate::error::Result;
use crate::server::{start_server, ServerState, SharedState};
use mastodon_api::MastodonClient;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter =
        EnvFilter::from_default_env().add_directive("mastodon_account_age=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting Mastodon Account Age Service...");

    let config = Config::from_env();
    info!("Port: {}", config.port);
    info!("Instances: {}", config.instances.join(", "));

    let client = MastodonClient::new();

    let port = config.port;
    let state: SharedState = Arc::new(ServerState::new(Arc::new(client), config));

    // Start HTTP server (blocking)
    start_server(state, port).await?;

    Ok(())
}
