//! HTTP server for account age endpoints
//!
//! Provides /, /health and /api/mastodon/{handle}.

use crate::config::Config;
use crate::error::AppError;
use crate::format::{format_profile, MULTIPLE_MATCH_CONFIDENCE};
use crate::handle::resolve_handle;
use crate::lookup::{find_account, AccountLookup, Matches};
use crate::types::{HealthResponse, MultipleMatches};
use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared state for the HTTP server
pub struct ServerState {
    pub lookup: Arc<dyn AccountLookup>,
    pub config: Config,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(lookup: Arc<dyn AccountLookup>, config: Config) -> Self {
        Self {
            lookup,
            config,
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<ServerState>;

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/mastodon", get(missing_handle))
        .route("/api/mastodon/", get(missing_handle))
        .route("/api/mastodon/{handle}", get(lookup_account))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: SharedState, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await
}

async fn root(State(state): State<SharedState>) -> String {
    format!(
        "Mastodon Account Age API is running. Searching instances: {}",
        state.config.instances.join(", ")
    )
}

/// Health check endpoint; never touches an instance
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let now = Utc::now();
    let uptime_secs = (now - state.started_at).num_seconds().max(0) as u64;

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime_secs,
    })
}

async fn missing_handle() -> AppError {
    AppError::BadRequest("Handle is required".to_string())
}

/// Look up a handle and return its profile, or every match for a bare
/// username found on several instances
async fn lookup_account(
    State(state): State<SharedState>,
    handle: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(handle) = handle.map_err(|rejection| {
        AppError::BadRequest(format!("Invalid handle: {}", rejection.body_text()))
    })?;
    let target = resolve_handle(&handle)?;
    let matches = find_account(state.lookup.as_ref(), &target, &state.config.instances).await?;
    let now = Utc::now();

    Ok(match matches {
        Matches::One(found) => {
            Json(format_profile(&found.account, &found.instance, now)).into_response()
        }
        Matches::Many(found) => {
            let users = found
                .iter()
                .map(|f| {
                    let mut profile = format_profile(&f.account, &f.instance, now);
                    profile.estimation_confidence = MULTIPLE_MATCH_CONFIDENCE.to_string();
                    profile
                })
                .collect();

            Json(MultipleMatches {
                users,
                note: format!(
                    "Found '{}' on multiple instances. Use the full handle (username@instance) to pick one.",
                    target.username()
                ),
            })
            .into_response()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::testing::{account, Reply, StubLookup};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{Duration, TimeZone};
    use tower::ServiceExt;

    fn test_config() -> Config {
        Config {
            port: 0,
            instances: vec![
                "one.social".to_string(),
                "two.social".to_string(),
                "three.social".to_string(),
            ],
        }
    }

    fn create_test_router(stub: Arc<StubLookup>) -> Router {
        let state = Arc::new(ServerState::new(stub, test_config()));
        create_router(state)
    }

    async fn send_get(router: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = send_get(router, uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_root_banner_lists_instances() {
        let router = create_test_router(Arc::new(StubLookup::new()));

        let (status, body) = send_get(router, "/").await;
        let text = String::from_utf8(body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert!(text.contains("Mastodon Account Age API"));
        assert!(text.contains("one.social, two.social, three.social"));
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let stub = Arc::new(StubLookup::new());
        let router = create_test_router(stub.clone());

        let (status, json) = get_json(router, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
        let timestamp = json["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
        assert!(json["uptime_secs"].as_u64().is_some());
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_handle_never_queries() {
        let stub = Arc::new(StubLookup::new());

        for uri in [
            "/api/mastodon/ab",
            "/api/mastodon/bad-name",
            "/api/mastodon/alice@localhost",
            "/api/mastodon/alice@example.c",
        ] {
            let (status, json) = get_json(create_test_router(stub.clone()), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert!(json["error"].as_str().is_some());
        }

        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_handle_is_json_400() {
        let stub = Arc::new(StubLookup::new());
        let router = create_test_router(stub.clone());

        let (status, json) = get_json(router, "/api/mastodon/%FF%FE").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid handle"));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_handle() {
        let stub = Arc::new(StubLookup::new());

        for uri in ["/api/mastodon", "/api/mastodon/"] {
            let (status, json) = get_json(create_test_router(stub.clone()), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["error"], "Handle is required");
        }
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_full_handle_single_profile() {
        let created = Utc.with_ymd_and_hms(2020, 1, 15, 10, 20, 30).unwrap();
        let stub = Arc::new(
            StubLookup::new().reply("other.social", Reply::Found(account("5", "alice", created))),
        );
        let router = create_test_router(stub.clone());

        let (status, json) = get_json(router, "/api/mastodon/alice@other.social").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["username"], "alice");
        assert_eq!(json["instance"], "other.social");
        assert_eq!(json["created_at"], "2020-01-15T10:20:30.000Z");
        assert_eq!(json["estimation_confidence"], "Very High (exact timestamp from API)");
        assert_eq!(json["description"], "Hello world");
        assert_eq!(json["region"], "N/A");
        assert!(json["age_days"].as_i64().unwrap() > 0);
        assert_eq!(stub.calls(), vec!["other.social"]);
    }

    #[tokio::test]
    async fn test_percent_encoded_handle() {
        let stub = Arc::new(
            StubLookup::new().reply("two.social", Reply::Found(account("2", "alice", Utc::now()))),
        );
        let router = create_test_router(stub.clone());

        let (status, json) = get_json(router, "/api/mastodon/alice%40two.social").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["instance"], "two.social");
        assert_eq!(stub.calls(), vec!["two.social"]);
    }

    #[tokio::test]
    async fn test_full_handle_not_found_queries_one_instance() {
        let stub = Arc::new(StubLookup::new());
        let router = create_test_router(stub.clone());

        let (status, json) = get_json(router, "/api/mastodon/ghost@solo.social").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let error = json["error"].as_str().unwrap();
        assert!(error.contains("solo.social"));
        assert!(!error.contains("one.social"));
        assert_eq!(stub.calls(), vec!["solo.social"]);
    }

    #[tokio::test]
    async fn test_username_single_match() {
        let stub = Arc::new(
            StubLookup::new()
                .reply("three.social", Reply::Found(account("3", "alice", Utc::now()))),
        );
        let router = create_test_router(stub.clone());

        let (status, json) = get_json(router, "/api/mastodon/alice").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["instance"], "three.social");
        assert!(json.get("users").is_none());
        assert_eq!(stub.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_username_multiple_matches() {
        let created = Utc::now() - Duration::days(400);
        let stub = Arc::new(
            StubLookup::new()
                .reply("one.social", Reply::Found(account("1", "alice", created)))
                .reply("three.social", Reply::Found(account("3", "alice", created))),
        );
        let router = create_test_router(stub);

        let (status, json) = get_json(router, "/api/mastodon/alice").await;

        assert_eq!(status, StatusCode::OK);
        let users = json["users"].as_array().unwrap();
        assert_eq!(users.len(), 2);
        for user in users {
            assert_eq!(user["estimation_confidence"], "Medium (multiple instances found)");
            assert_eq!(user["account_age"], "1 years, 1 months");
        }
        assert_eq!(users[0]["instance"], "one.social");
        assert_eq!(users[1]["instance"], "three.social");
        assert!(json["note"].as_str().unwrap().contains("alice"));
    }

    #[tokio::test]
    async fn test_username_zero_matches_lists_instances() {
        let stub = Arc::new(
            StubLookup::new().reply("two.social", Reply::Status(500, "boom".to_string())),
        );
        let router = create_test_router(stub);

        let (status, json) = get_json(router, "/api/mastodon/nobody").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let error = json["error"].as_str().unwrap();
        for instance in ["one.social", "two.social", "three.social"] {
            assert!(error.contains(instance));
        }
    }

    #[tokio::test]
    async fn test_full_handle_upstream_status_passthrough() {
        let stub = Arc::new(StubLookup::new().reply(
            "busy.social",
            Reply::Status(503, "Down for maintenance".to_string()),
        ));
        let router = create_test_router(stub);

        let (status, json) = get_json(router, "/api/mastodon/alice@busy.social").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["error"], "Failed to fetch Mastodon account");
        assert!(json["details"]
            .as_str()
            .unwrap()
            .contains("Down for maintenance"));
        assert_eq!(json["instances"][0], "busy.social");
    }

    #[tokio::test]
    async fn test_full_handle_malformed_upstream_is_500() {
        let stub = Arc::new(StubLookup::new().reply("odd.social", Reply::Malformed));
        let router = create_test_router(stub);

        let (status, json) = get_json(router, "/api/mastodon/alice@odd.social").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json["details"]
            .as_str()
            .unwrap()
            .starts_with("Malformed account data"));
    }
}
