//! Axum route handlers for the Analysis API.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::{info, warn};

use crate::analysis::models::AnalysisResult;
use crate::analysis::parser::{parse_posting, ParsedPosting};
use crate::analysis::scorer::analyze_internship;
use crate::analysis::signals::InternshipSignals;
use crate::embedding_client::EmbeddingProvider;
use crate::errors::AppError;
use crate::matching::match_score;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzeRequest {
    pub signals: InternshipSignals,
    pub resume_text: Option<String>,
    pub job_description: Option<String>,
}

fn non_blank(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|t| !t.trim().is_empty())
}

/// POST /api/v1/analysis
///
/// Scores the submitted signals. When both a resume and a job description
/// are supplied the resume match is attached. Signals and result are saved
/// so the latest analysis can be fetched again; a failed save is logged and
/// the result is still returned.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    if let Err(e) = state.store.save_internship_data(&request.signals).await {
        warn!("Failed to save internship signals: {e}");
    }

    let mut result = analyze_internship(&request.signals);

    if let (Some(resume), Some(jd)) = (
        non_blank(&request.resume_text),
        non_blank(&request.job_description),
    ) {
        let embedder = state.embedding_client().await;
        let resume_match = match_score(
            resume,
            jd,
            request.signals.role_title(),
            embedder.as_ref().map(|c| c as &dyn EmbeddingProvider),
        )
        .await;
        result = result.with_resume_match(resume_match);
    }

    if let Err(e) = state.store.save_analysis_results(&result).await {
        warn!("Failed to save analysis result: {e}");
    }
    info!(
        total_score = result.total_score,
        level = ?result.credibility_level,
        warnings = result.warnings.len(),
        "Analysis saved"
    );

    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub text: String,
}

/// POST /api/v1/analysis/parse
///
/// Extracts company details and red flags from a pasted posting and returns
/// pre-filled signals. Nothing is stored.
pub async fn handle_parse_posting(
    Json(request): Json<ParseRequest>,
) -> Result<Json<ParsedPosting>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let parsed = parse_posting(&request.text);
    info!(
        red_flags = parsed.red_flags.len(),
        company = parsed.company_name.as_deref().unwrap_or("-"),
        "Posting parsed"
    );
    Ok(Json(parsed))
}

/// GET /api/v1/analysis/latest
pub async fn handle_latest_analysis(
    State(state): State<AppState>,
) -> Result<Json<AnalysisResult>, AppError> {
    state
        .store
        .analysis_results()
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No analysis has been run yet".to_string()))
}

/// GET /api/v1/analysis/signals
pub async fn handle_saved_signals(
    State(state): State<AppState>,
) -> Result<Json<InternshipSignals>, AppError> {
    state
        .store
        .internship_data()
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No internship data has been saved".to_string()))
}

/// DELETE /api/v1/analysis
///
/// Forgets the saved signals and result. Preferences and the API key stay.
pub async fn handle_reset_analysis(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state
        .store
        .remove(crate::storage::INTERNSHIP_DATA_KEY)
        .await?;
    state
        .store
        .remove(crate::storage::ANALYSIS_RESULTS_KEY)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
