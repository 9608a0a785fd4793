//! Axum route handlers for the Match API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::embedding_client::EmbeddingProvider;
use crate::errors::AppError;
use crate::matching::{match_score, MatchResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub resume_text: String,
    pub job_description: String,
    #[serde(default)]
    pub position: Option<String>,
}

/// POST /api/v1/match
///
/// Scores a resume against a job description. Uses embeddings when a
/// credential is configured, keyword overlap otherwise.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResult>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resumeText cannot be empty".to_string()));
    }
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "jobDescription cannot be empty".to_string(),
        ));
    }

    let embedder = state.embedding_client().await;
    let result = match_score(
        &request.resume_text,
        &request.job_description,
        request.position.as_deref(),
        embedder.as_ref().map(|c| c as &dyn EmbeddingProvider),
    )
    .await;

    Ok(Json(result))
}
