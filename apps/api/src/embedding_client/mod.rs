/// Embedding Client: the single point of entry for remote text-embedding calls.
///
/// Talks to a Hugging Face style feature-extraction endpoint. The response is
/// a JSON array (nested per token or per sentence, depending on the model)
/// which is flattened into one vector.
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub const MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";
pub const DEFAULT_EMBEDDING_URL: &str =
    "https://api-inference.huggingface.co/models/sentence-transformers/all-MiniLM-L6-v2";

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Embedding response contains a non-numeric value")]
    NonNumeric,

    #[error("Embedding response is empty")]
    EmptyVector,
}

/// Anything that can turn text into an embedding vector.
/// The matcher only depends on this trait, never on HTTP directly.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Model name, reported in match details.
    fn model(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    inputs: &'a str,
    options: EmbeddingOptions,
}

#[derive(Debug, Serialize)]
struct EmbeddingOptions {
    wait_for_model: bool,
}

#[derive(Clone)]
pub struct EmbeddingClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl EmbeddingClient {
    /// `client` is shared across requests and carries the request timeout.
    pub fn new(client: Client, api_key: String, endpoint: String) -> Self {
        Self {
            client,
            api_key,
            endpoint,
        }
    }

    pub async fn fetch_embeddings(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let request_body = EmbeddingRequest {
            inputs: text,
            options: EmbeddingOptions {
                wait_for_model: true,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        let vector = flatten_embedding(&body)?;

        debug!("Embedding fetched: {} dimensions", vector.len());
        Ok(vector)
    }
}

#[async_trait]
impl EmbeddingProvider for EmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.fetch_embeddings(text).await
    }

    fn model(&self) -> &str {
        MODEL
    }
}

/// Flattens an arbitrarily nested JSON array of numbers into one vector.
/// A non-array body yields an empty vector, which is an error.
pub fn flatten_embedding(body: &Value) -> Result<Vec<f32>, EmbeddingError> {
    let mut vector = Vec::new();
    if let Value::Array(items) = body {
        for item in items {
            push_flattened(item, &mut vector)?;
        }
    }

    if vector.is_empty() {
        return Err(EmbeddingError::EmptyVector);
    }
    Ok(vector)
}

fn push_flattened(value: &Value, out: &mut Vec<f32>) -> Result<(), EmbeddingError> {
    match value {
        Value::Array(items) => items.iter().try_for_each(|v| push_flattened(v, out)),
        Value::Number(n) => {
            let x = n.as_f64().ok_or(EmbeddingError::NonNumeric)?;
            out.push(x as f32);
            Ok(())
        }
        _ => Err(EmbeddingError::NonNumeric),
    }
}
