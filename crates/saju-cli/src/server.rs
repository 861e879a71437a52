//! HTTP front end for the configured scorer.
//!
//! `POST /api/compatibility` scores a pair; `GET /health` reports the active
//! strategy. Validation problems answer 400 with `{success: false, message}`.
//! Upstream trouble never surfaces here: the scorer already degrades to a
//! fallback result.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use saju_core::{AfflictionMatch, BirthInput, CompatibilityResult, ReportingMode};
use saju_service::CompatibilityScorer;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    scorer: Arc<dyn CompatibilityScorer>,
    /// Cancelled on shutdown; in-flight remote calls fall back.
    shutdown: CancellationToken,
}

impl AppState {
    pub fn new(scorer: Arc<dyn CompatibilityScorer>, shutdown: CancellationToken) -> Self {
        Self { scorer, shutdown }
    }
}

#[derive(Debug, Deserialize)]
struct CompatibilityRequest {
    person1: BirthInput,
    person2: BirthInput,
    #[serde(default)]
    mode: ReportingMode,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompatibilityResponse<'a> {
    success: bool,
    #[serde(flatten)]
    result: &'a CompatibilityResult,
    sal_analysis: Vec<AfflictionMatch>,
}

fn bad_request(message: impl Into<String>) -> Response {
    let body = json!({ "success": false, "message": message.into() });
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

async fn compatibility(
    State(state): State<AppState>,
    payload: Result<Json<CompatibilityRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    let scored = state
        .scorer
        .score_until(&req.person1, &req.person2, state.shutdown.child_token())
        .await;

    match scored {
        Ok(result) => {
            tracing::debug!(score = result.score, source = %result.source, "scored pair");
            let body = CompatibilityResponse {
                success: true,
                result: &result,
                sal_analysis: result.afflictions(req.mode),
            };
            Json(body).into_response()
        }
        Err(err) => {
            tracing::debug!("rejected input: {err}");
            bad_request(err.to_string())
        }
    }
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "strategy": state.scorer.name() }))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/compatibility", post(compatibility))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, scorer: Arc<dyn CompatibilityScorer>) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on {}", listener.local_addr()?);

    let shutdown = CancellationToken::new();
    let app = router(AppState::new(scorer, shutdown.clone()));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("server error")
}

async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
        return;
    }
    tracing::info!("shutting down");
    shutdown.cancel();
}
