//! Maps raw Mastodon accounts to [`FormattedProfile`] documents
//!
//! Ages use 365-day years and 30-day months. The arithmetic is deliberately
//! approximate; results must not be "corrected" to calendar math.

use chrono::{DateTime, SecondsFormat, Utc};
use mastodon_api::Account;
use regex::Regex;
use std::sync::LazyLock;

use crate::types::FormattedProfile;

pub const EXACT_CONFIDENCE: &str = "Very High (exact timestamp from API)";
pub const MULTIPLE_MATCH_CONFIDENCE: &str = "Medium (multiple instances found)";
pub const ACCURACY_RANGE: &str = "Exact (to the second, ISO 8601 timestamp)";
pub const UNKNOWN_REGION: &str = "N/A";

const SECONDS_PER_DAY: i64 = 86_400;
const DAYS_PER_YEAR: i64 = 365;
const DAYS_PER_MONTH: i64 = 30;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Build the output document for `account` found on `instance`
pub fn format_profile(account: &Account, instance: &str, now: DateTime<Utc>) -> FormattedProfile {
    let days = age_days(account.created_at, now);

    let display_name = if account.display_name.is_empty() {
        account.username.clone()
    } else {
        account.display_name.clone()
    };

    FormattedProfile {
        id: account.id.clone(),
        username: account.username.clone(),
        display_name,
        handle: format!("{}@{}", account.username, instance),
        instance: instance.to_string(),
        created_at: account
            .created_at
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        estimated_creation_date: account.created_at.format("%-m/%-d/%Y").to_string(),
        account_age: account_age(days),
        age_days: days,
        verified: status_label(account.bot, account.locked).to_string(),
        bot: account.bot,
        locked: account.locked,
        description: strip_html(&account.note),
        followers: account.followers_count,
        following: account.following_count,
        posts: account.statuses_count,
        last_status_at: account.last_status_at.clone(),
        avatar: avatar_url(account, instance),
        profile_link: profile_link(account, instance),
        region: UNKNOWN_REGION.to_string(),
        estimation_confidence: EXACT_CONFIDENCE.to_string(),
        accuracy_range: ACCURACY_RANGE.to_string(),
    }
}

/// Whole days between `created_at` and `now`, never negative
pub fn age_days(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - created_at)
        .num_seconds()
        .div_euclid(SECONDS_PER_DAY)
        .max(0)
}

/// `"<Y> years, <M> months"`, or `"<M> months"` under a year
pub fn account_age(days: i64) -> String {
    let years = days / DAYS_PER_YEAR;
    let months = (days % DAYS_PER_YEAR) / DAYS_PER_MONTH;

    if years > 0 {
        format!("{} years, {} months", years, months)
    } else {
        format!("{} months", months)
    }
}

/// Bot flag wins over locked
pub fn status_label(bot: bool, locked: bool) -> &'static str {
    if bot {
        "Bot Account"
    } else if locked {
        "Protected"
    } else {
        "Standard"
    }
}

/// Remove `<...>` tags; entities are left as-is
pub fn strip_html(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn avatar_url(account: &Account, instance: &str) -> String {
    non_empty(&account.avatar_static)
        .or(non_empty(&account.avatar))
        .map(str::to_string)
        .unwrap_or_else(|| format!("https://{}/avatars/original/missing.png", instance))
}

fn profile_link(account: &Account, instance: &str) -> String {
    non_empty(&account.url)
        .map(str::to_string)
        .unwrap_or_else(|| format!("https://{}/@{}", instance, account.username))
}
