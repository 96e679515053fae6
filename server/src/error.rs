use std::time::Duration;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::config::ServerConfig;

/// Failures while handling a chat request. Every variant is reported to the
/// caller as a 500.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("failed to read request body: {0}")]
    BodyRead(String),

    #[error("invalid JSON body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("request body must not be null")]
    NullBody,

    #[error("Sports proxy request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Sports proxy did not respond within {0:?}")]
    Timeout(Duration),

    #[error("Sports proxy error: {0}")]
    UpstreamStatus(u16),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    debug: ErrorDebug,
}

#[derive(Debug, Serialize)]
struct ErrorDebug {
    upstream: String,
    #[serde(rename = "hasToken")]
    has_token: bool,
}

impl ChatError {
    pub fn into_response_with(self, cfg: &ServerConfig) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
            debug: ErrorDebug {
                upstream: cfg.upstream_url.clone(),
                has_token: cfg.has_token(),
            },
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
