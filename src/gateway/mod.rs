//! HTTP gateway (Axum) for statement intake and title recommendation.
//!
//! This module is primarily used by the `moniker-server` binary.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{
    GenerateTitlesRequest, GenerateTitlesResponse, PhraseSimilarity, UploadResumeRequest,
    UploadResumeResponse, generate_titles_handler, upload_resume_handler,
};
pub use state::HandlerState;

use crate::embedding::TextEmbedder;
use crate::index::VectorIndex;
use crate::resume::ResumeStore;

/// Builds the service router over `state`.
pub fn create_router_with_state<E, V, R>(state: HandlerState<E, V, R>) -> Router
where
    E: TextEmbedder + 'static,
    V: VectorIndex + 'static,
    R: ResumeStore + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/v1/resumes", post(upload_resume_handler))
        .route("/v1/titles", post(generate_titles_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub embedder: &'static str,
    pub index: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler<E, V, R>(
    axum::extract::State(state): axum::extract::State<HandlerState<E, V, R>>,
) -> Response
where
    E: TextEmbedder + 'static,
    V: VectorIndex + 'static,
    R: ResumeStore + 'static,
{
    let embedder_status = match state.embedder.health_check().await {
        Ok(()) => "ready",
        Err(_) => "error",
    };
    let index_status = match state.index.health_check() {
        Ok(()) => "ready",
        Err(_) => "error",
    };

    let components = ComponentStatus {
        http: "ready",
        embedder: embedder_status,
        index: index_status,
    };

    let is_ready = components.embedder == "ready" && components.index == "ready";
    let status_code = if is_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let status_msg = if is_ready { "ok" } else { "pending" };

    (
        status_code,
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}
