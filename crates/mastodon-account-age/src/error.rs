//! Error types for the account age service

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt;

/// Request-level error that converts to an HTTP response
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed handle
    BadRequest(String),
    /// No account found on any of the searched instances
    NotFound {
        message: String,
        instances: Vec<String>,
    },
    /// Lookup failed for a reason other than a missing account
    Upstream {
        /// Status reported by the instance, if it answered with an error status
        status: Option<u16>,
        details: String,
        instances: Vec<String>,
    },
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Upstream { status, .. } => status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "{}", msg),
            AppError::NotFound { message, .. } => write!(f, "{}", message),
            AppError::Upstream { details, .. } => {
                write!(f, "Failed to fetch Mastodon account: {}", details)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "Rejected handle");
                json!({ "error": msg })
            }
            AppError::NotFound { message, instances } => {
                tracing::error!(instances = ?instances, error = %message, "Account not found");
                json!({ "error": message })
            }
            AppError::Upstream {
                details, instances, ..
            } => {
                tracing::error!(
                    instances = ?instances,
                    status = status.as_u16(),
                    error = %details,
                    "Account lookup failed"
                );
                json!({
                    "error": "Failed to fetch Mastodon account",
                    "details": details,
                    "instances": instances,
                })
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Process-level startup error
#[derive(Debug)]
pub enum ServiceError {
    /// Configuration error
    Config(String),
    /// Server socket error
    Io(std::io::Error),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::Io(e) => write!(f, "Server error: {}", e),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<tracing_subscriber::filter::ParseError> for ServiceError {
    fn from(e: tracing_subscriber::filter::ParseError) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
