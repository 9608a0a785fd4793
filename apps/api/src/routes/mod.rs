pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::matching::handlers as matching;
use crate::settings::handlers as settings;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route(
            "/api/v1/analysis",
            post(analysis::handle_analyze).delete(analysis::handle_reset_analysis),
        )
        .route(
            "/api/v1/analysis/latest",
            get(analysis::handle_latest_analysis),
        )
        .route("/api/v1/analysis/parse", post(analysis::handle_parse_posting))
        .route(
            "/api/v1/analysis/signals",
            get(analysis::handle_saved_signals),
        )
        // Match API
        .route("/api/v1/match", post(matching::handle_match))
        // Settings API
        .route(
            "/api/v1/preferences",
            get(settings::handle_get_preferences).put(settings::handle_put_preferences),
        )
        .route(
            "/api/v1/settings",
            get(settings::handle_get_settings).delete(settings::handle_clear_all),
        )
        .route("/api/v1/settings/api-key", put(settings::handle_put_api_key))
        .with_state(state)
}
