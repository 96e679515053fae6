#![deny(clippy::print_stdout, clippy::print_stderr)]

mod chat;
mod cli;
mod config;
mod error;
mod mock;
mod stream;

pub use cli::Cli;
pub use config::ServerConfig;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Json;
use axum::Router;
use bytes::Bytes;
use tower_http::trace::TraceLayer;
use tracing::error;
use tracing::info;
use tracing::info_span;
use tracing::warn;
use tracing::Instrument;
use tracing_subscriber::EnvFilter;

use crate::chat::IncomingChatRequest;
use crate::chat::ProxyRequest;
use crate::error::ChatError;
use crate::mock::mock_sse_body;
use crate::stream::passthrough_body;

pub const CHAT_PATH: &str = "/chat";

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<ServerConfig>,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(cfg: ServerConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("sports-chat-server/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            cfg: Arc::new(cfg),
            client,
        })
    }
}

pub async fn run_main(cli: Cli) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = ServerConfig::from_cli(&cli);
    if cfg.is_production() {
        info!("production mode: mock fallback disabled");
    } else {
        warn!("non-production mode: upstream 401s are answered with a mock stream");
    }
    info!(
        upstream = %cfg.upstream_url,
        has_token = cfg.has_token(),
        "forwarding chat requests"
    );

    let app = build_app(AppState::new(cfg)?);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    info!("sports-chat-server listening on http://{}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(CHAT_PATH, post(chat).options(chat_preflight))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

async fn chat_preflight() -> impl IntoResponse {
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
        (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
    ]
}

async fn chat(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let request_id = uuid::Uuid::new_v4();
    async move {
        let result = match body {
            Ok(body) => forward_chat(&state, &body).await,
            Err(rejection) => Err(ChatError::BodyRead(rejection.body_text())),
        };
        match result {
            Ok(r) => r,
            Err(e) => {
                error!("chat handler error: {e}");
                e.into_response_with(&state.cfg)
            }
        }
    }
    .instrument(info_span!("chat", %request_id))
    .await
}

async fn forward_chat(state: &AppState, body: &[u8]) -> Result<Response, ChatError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    if value.is_null() {
        return Err(ChatError::NullBody);
    }
    let chat = IncomingChatRequest::from_json(&value).resolve();
    let payload = ProxyRequest::from_chat(&chat);

    let cfg = &state.cfg;
    let mut builder = state
        .client
        .post(&cfg.upstream_url)
        .header(header::CONTENT_TYPE, "application/json")
        .json(&payload);
    if let Some(token) = cfg.auth_token.as_deref() {
        builder = builder.bearer_auth(token);
    }

    let resp = tokio::time::timeout(cfg.request_timeout, builder.send())
        .await
        .map_err(|_| ChatError::Timeout(cfg.request_timeout))??;

    let status = resp.status();
    if status.is_success() {
        info!(status = status.as_u16(), "streaming sports-proxy response");
        return Ok(sse_response(passthrough_body(resp.bytes_stream())));
    }

    if status == StatusCode::UNAUTHORIZED && !cfg.is_production() {
        warn!("sports-proxy rejected authentication, serving mock response");
        return Ok(sse_response(Body::from(mock_sse_body(&chat))));
    }

    Err(ChatError::UpstreamStatus(status.as_u16()))
}

fn sse_response(body: Body) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CACHE_CONTROL, "no-cache"),
            (header::CONNECTION, "keep-alive"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
        body,
    )
        .into_response()
}
