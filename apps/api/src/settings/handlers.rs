use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::settings::Preferences;
use crate::state::AppState;
use crate::storage::API_KEY_KEY;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsOverview {
    /// A credential was saved through the API (the env key is not reported).
    pub has_stored_api_key: bool,
    /// Resume matching will attempt the embedding endpoint.
    pub semantic_matching: bool,
    pub stored_keys: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyUpdate {
    #[serde(default)]
    pub api_key: String,
}

/// GET /api/v1/preferences
pub async fn handle_get_preferences(
    State(state): State<AppState>,
) -> Result<Json<Preferences>, AppError> {
    Ok(Json(state.store.preferences().await?))
}

/// PUT /api/v1/preferences
pub async fn handle_put_preferences(
    State(state): State<AppState>,
    Json(preferences): Json<Preferences>,
) -> Result<Json<Preferences>, AppError> {
    state.store.save_preferences(&preferences).await?;
    Ok(Json(preferences))
}

/// PUT /api/v1/settings/api-key
///
/// Stores the embedding credential. An empty key clears it and matching
/// falls back to the `HF_API_KEY` environment value, if any.
pub async fn handle_put_api_key(
    State(state): State<AppState>,
    Json(update): Json<ApiKeyUpdate>,
) -> Result<StatusCode, AppError> {
    state.store.save_api_key(&update.api_key).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/settings
pub async fn handle_get_settings(
    State(state): State<AppState>,
) -> Result<Json<SettingsOverview>, AppError> {
    Ok(Json(SettingsOverview {
        has_stored_api_key: state.store.exists(API_KEY_KEY).await?,
        semantic_matching: state.embedding_client().await.is_some(),
        stored_keys: state.store.keys().await?,
    }))
}

/// DELETE /api/v1/settings
///
/// Wipes everything the service has stored: signals, results, preferences
/// and the saved credential.
pub async fn handle_clear_all(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.store.clear().await?;
    tracing::info!("All stored data cleared");
    Ok(StatusCode::NO_CONTENT)
}
