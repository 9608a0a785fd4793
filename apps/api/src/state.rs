use reqwest::Client;
use tracing::warn;

use crate::config::Config;
use crate::embedding_client::EmbeddingClient;
use crate::storage::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Store,
    /// Shared HTTP client for embedding calls; carries the request timeout.
    pub http: Client,
}

impl AppState {
    /// Embedding client for the current credential, or `None` when no
    /// credential is stored or configured. A stored key wins over the env key;
    /// an unreadable store falls back to the env key.
    pub async fn embedding_client(&self) -> Option<EmbeddingClient> {
        let stored = match self.store.api_key().await {
            Ok(key) => key,
            Err(e) => {
                warn!("Stored API key unavailable, using configured key: {e}");
                None
            }
        };

        stored
            .or_else(|| self.config.hf_api_key.clone())
            .map(|key| {
                EmbeddingClient::new(self.http.clone(), key, self.config.embedding_url.clone())
            })
    }
}
