use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::embedding::TextEmbedder;
use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;
use crate::index::VectorIndex;
use crate::recommend::RecommendOptions;
use crate::resume::{ResumeStatus, ResumeStore};
use crate::scoring::ScoredPhrase;

#[derive(Debug, Deserialize)]
pub struct UploadResumeRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResumeResponse {
    #[serde(rename = "resumeId")]
    pub resume_id: Uuid,
    pub status: ResumeStatus,
}

#[derive(Debug, Deserialize)]
pub struct GenerateTitlesRequest {
    #[serde(rename = "resumeId")]
    pub resume_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct GenerateTitlesResponse {
    pub titles: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub top_similar: Vec<PhraseSimilarity>,
}

#[derive(Debug, Serialize)]
pub struct PhraseSimilarity {
    pub phrase: String,
    pub similarity: f32,
}

impl From<ScoredPhrase> for PhraseSimilarity {
    fn from(scored: ScoredPhrase) -> Self {
        Self {
            phrase: scored.phrase,
            similarity: scored.score,
        }
    }
}

/// `POST /v1/resumes` — statement intake.
#[instrument(skip(state, request))]
pub async fn upload_resume_handler<E, V, R>(
    State(state): State<HandlerState<E, V, R>>,
    Json(request): Json<serde_json::Value>,
) -> Result<Json<UploadResumeResponse>, GatewayError>
where
    E: TextEmbedder + 'static,
    V: VectorIndex + 'static,
    R: ResumeStore + 'static,
{
    let request: UploadResumeRequest = serde_json::from_value(request)
        .map_err(|e| GatewayError::InvalidRequest(format!("invalid request schema: {}", e)))?;

    let record = state.resumes.store(&request.text).map_err(|e| {
        warn!(error = %e, "Statement rejected at intake");
        GatewayError::from(e)
    })?;

    info!(resume_id = %record.id, "Statement accepted");

    Ok(Json(UploadResumeResponse {
        resume_id: record.id,
        status: record.status,
    }))
}

/// `POST /v1/titles` — recommendation.
#[instrument(skip(state, request))]
pub async fn generate_titles_handler<E, V, R>(
    State(state): State<HandlerState<E, V, R>>,
    Json(request): Json<serde_json::Value>,
) -> Result<Json<GenerateTitlesResponse>, GatewayError>
where
    E: TextEmbedder + 'static,
    V: VectorIndex + 'static,
    R: ResumeStore + 'static,
{
    let request: GenerateTitlesRequest = serde_json::from_value(request)
        .map_err(|e| GatewayError::InvalidRequest(format!("invalid request schema: {}", e)))?;

    info!(resume_id = %request.resume_id, "Title recommendation requested");

    let recommendation = state
        .recommender
        .recommend(request.resume_id, RecommendOptions::default())
        .await?;

    Ok(Json(GenerateTitlesResponse {
        titles: recommendation.titles,
        top_similar: recommendation
            .top_similar
            .into_iter()
            .map(PhraseSimilarity::from)
            .collect(),
    }))
}
