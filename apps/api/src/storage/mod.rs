//! Key-value persistence for signals, results, preferences and the embedding credential.
//!
//! Backends implement the raw string `KeyValueStore` trait; `Store` layers
//! JSON (de)serialization and the well-known keys on top.

pub mod memory;
pub mod redis_store;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::analysis::models::AnalysisResult;
use crate::analysis::signals::InternshipSignals;
use crate::settings::Preferences;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

pub const INTERNSHIP_DATA_KEY: &str = "internship_data";
pub const ANALYSIS_RESULTS_KEY: &str = "analysis_results";
pub const PREFERENCES_KEY: &str = "user_preferences";
pub const API_KEY_KEY: &str = "hf_api_key";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn save(&self, key: &str, value: String) -> Result<(), StoreError>;

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Returns whether the key existed.
    async fn remove(&self, key: &str) -> Result<bool, StoreError>;

    async fn clear(&self) -> Result<(), StoreError>;

    /// All keys, sorted.
    async fn keys(&self) -> Result<Vec<String>, StoreError>;

    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key).await?.is_some())
    }
}

/// Typed façade over a `KeyValueStore` backend. Cheap to clone.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn KeyValueStore>,
}

impl Store {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::default()))
    }

    pub async fn save_json<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)?;
        self.backend.save(key, json).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.backend.get(key).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub async fn remove(&self, key: &str) -> Result<bool, StoreError> {
        self.backend.remove(key).await
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        self.backend.clear().await
    }

    pub async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.backend.exists(key).await
    }

    pub async fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.backend.keys().await
    }

    // ── Well-known keys ────────────────────────────────────────────────────

    pub async fn save_internship_data(&self, signals: &InternshipSignals) -> Result<(), StoreError> {
        self.save_json(INTERNSHIP_DATA_KEY, signals).await
    }

    pub async fn internship_data(&self) -> Result<Option<InternshipSignals>, StoreError> {
        self.get_json(INTERNSHIP_DATA_KEY).await
    }

    pub async fn save_analysis_results(&self, result: &AnalysisResult) -> Result<(), StoreError> {
        self.save_json(ANALYSIS_RESULTS_KEY, result).await
    }

    pub async fn analysis_results(&self) -> Result<Option<AnalysisResult>, StoreError> {
        self.get_json(ANALYSIS_RESULTS_KEY).await
    }

    pub async fn save_preferences(&self, preferences: &Preferences) -> Result<(), StoreError> {
        self.save_json(PREFERENCES_KEY, preferences).await
    }

    /// Saved preferences, or the defaults when none were saved.
    pub async fn preferences(&self) -> Result<Preferences, StoreError> {
        Ok(self.get_json(PREFERENCES_KEY).await?.unwrap_or_default())
    }

    /// Stored verbatim, not as JSON. A blank key removes the stored one.
    pub async fn save_api_key(&self, api_key: &str) -> Result<(), StoreError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            self.backend.remove(API_KEY_KEY).await?;
            return Ok(());
        }
        self.backend.save(API_KEY_KEY, api_key.to_string()).await
    }

    pub async fn api_key(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .backend
            .get(API_KEY_KEY)
            .await?
            .filter(|k| !k.trim().is_empty()))
    }
}
