use std::collections::HashSet;
use std::env;

/// Port used when `PORT` is unset or invalid
pub const DEFAULT_PORT: u16 = 3000;

/// Instances searched for bare usernames unless `MASTODON_INSTANCES` is set
pub const DEFAULT_INSTANCES: [&str; 3] = ["mastodon.social", "mastodon.online", "mstdn.social"];

/// Service configuration, read once from the environment at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Instances queried, in order, when a handle has no `@instance` part
    pub instances: Vec<String>,
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: parse_port(env::var("PORT").ok().as_deref()),
            instances: parse_instances(env::var("MASTODON_INSTANCES").ok().as_deref()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            instances: default_instances(),
        }
    }
}

fn default_instances() -> Vec<String> {
    DEFAULT_INSTANCES.iter().map(|s| s.to_string()).collect()
}

fn parse_port(value: Option<&str>) -> u16 {
    value
        .and_then(|s| s.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Comma-separated hostnames; blank entries and case-insensitive repeats are
/// dropped (first spelling wins) and an empty list falls back to the defaults
fn parse_instances(value: Option<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let instances: Vec<String> = value
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_ascii_lowercase()))
        .map(|s| s.to_string())
        .collect();

    if instances.is_empty() {
        default_instances()
    } else {
        instances
    }
}
