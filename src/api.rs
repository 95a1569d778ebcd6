//! HTTP server receiving messaging-platform webhooks.
//!
//! Each webhook POST is one invocation: verify, decode, then hand every
//! message event to the relay in order. Any error ends that invocation with a
//! JSON error body; the server keeps running.

use crate::relay::Relay;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use honyaku_channels::line::{self, signature};
use honyaku_core::{config::ApiConfig, error::HonyakuError};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    relay: Arc<Relay>,
    /// Channel secret for signature checks. `None` disables verification.
    channel_secret: Option<String>,
    uptime: Instant,
}

impl ApiState {
    pub fn new(relay: Arc<Relay>, channel_secret: Option<String>) -> Self {
        Self {
            relay,
            channel_secret,
            uptime: Instant::now(),
        }
    }
}

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({"error": message.into()})))
}

/// HTTP status for an error that ended an invocation.
fn status_for(err: &HonyakuError) -> StatusCode {
    match err {
        HonyakuError::Payload(_) => StatusCode::BAD_REQUEST,
        HonyakuError::Signature(_) => StatusCode::UNAUTHORIZED,
        HonyakuError::Provider(_) | HonyakuError::Rejected(_) | HonyakuError::Channel(_) => {
            StatusCode::BAD_GATEWAY
        }
        HonyakuError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Check the webhook signature header. Returns `None` if accepted.
fn check_signature(headers: &HeaderMap, secret: &Option<String>, body: &[u8]) -> Option<ApiError> {
    let secret = secret.as_ref()?;

    let header = match headers.get(signature::SIGNATURE_HEADER) {
        Some(h) => h,
        None => {
            return Some(api_error(
                StatusCode::UNAUTHORIZED,
                "missing X-Line-Signature header",
            ))
        }
    };

    let value = match header.to_str() {
        Ok(v) => v,
        Err(_) => {
            return Some(api_error(
                StatusCode::UNAUTHORIZED,
                "invalid X-Line-Signature header",
            ))
        }
    };

    match signature::verify(secret, body, value) {
        Ok(()) => None,
        Err(e) => {
            warn!("webhook signature rejected: {e}");
            Some(api_error(StatusCode::UNAUTHORIZED, e.to_string()))
        }
    }
}

/// `GET /api/health` — liveness with uptime.
async fn health(State(state): State<ApiState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "uptime_secs": state.uptime.elapsed().as_secs(),
    }))
}

/// `POST {webhook_path}` — LINE webhook callback.
async fn webhook(
    headers: HeaderMap,
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let invocation_id = Uuid::new_v4();

    // 1. Signature.
    if let Some(err) = check_signature(&headers, &state.channel_secret, &body) {
        return Err(err);
    }

    // 2. Decode. A malformed envelope is rejected before anything runs.
    let events = line::decode_webhook(&body).map_err(|e| {
        warn!("webhook {invocation_id}: {e}");
        api_error(status_for(&e), e.to_string())
    })?;
    info!("webhook {invocation_id}: {} message event(s)", events.len());

    // 3. Relay, in order; first failure aborts the invocation.
    let span = info_span!("webhook", invocation = %invocation_id);
    let outcomes = state
        .relay
        .handle_batch(events)
        .instrument(span)
        .await
        .map_err(|e| {
            error!("webhook {invocation_id} aborted: {e}");
            api_error(status_for(&e), e.to_string())
        })?;

    Ok(Json(json!({
        "status": "ok",
        "invocation_id": invocation_id.to_string(),
        "processed": outcomes.len(),
    })))
}

/// Build the axum router with shared state.
pub fn build_router(state: ApiState, webhook_path: &str, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route(webhook_path, post(webhook))
        .layer(axum::extract::DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: &ApiConfig, state: ApiState) -> anyhow::Result<()> {
    let app = build_router(state, &config.webhook_path, config.max_body_bytes);
    let addr = format!("{}:{}", config.host, config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {addr}: {e}"))?;

    info!("listening on {addr}, webhook at {}", config.webhook_path);
    axum::serve(listener, app).await?;
    Ok(())
}
