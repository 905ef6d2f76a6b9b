//! Cohere embedding client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use stp_core::{EmbeddingProvider, Error, Result};

/// Output dimension of Cohere's `embed-english-v3.0` model.
pub const COHERE_EMBED_DIMENSION: usize = 1024;

/// Configuration for the Cohere embedding client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohereConfig {
    pub api_key: String,
    pub model: String,
    pub api_url: String,
}

impl CohereConfig {
    /// Create configuration from environment variables.
    ///
    /// A missing `COHERE_API_KEY` is not fatal here: the embedder reports it
    /// per call, so ingestion and chat degrade instead of the server
    /// refusing to start.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_key: env::var("COHERE_API_KEY").unwrap_or_default(),
            model: env::var("COHERE_EMBED_MODEL")
                .unwrap_or_else(|_| "embed-english-v3.0".to_string()),
            api_url: env::var("COHERE_API_URL")
                .unwrap_or_else(|_| "https://api.cohere.ai/v1".to_string()),
        }
    }

    /// Create configuration with explicit values
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: "embed-english-v3.0".to_string(),
            api_url: "https://api.cohere.ai/v1".to_string(),
        }
    }
}

/// Cohere embedding client
pub struct CohereEmbedder {
    config: CohereConfig,
    client: Client,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    texts: Vec<&'a str>,
    model: &'a str,
    input_type: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl CohereEmbedder {
    /// Create a new Cohere client from configuration
    pub fn new(config: CohereConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a new Cohere client from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(CohereConfig::from_env())
    }
}

#[async_trait]
impl EmbeddingProvider for CohereEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if self.config.api_key.is_empty() {
            return Err(Error::Embedding(
                "COHERE_API_KEY is not set; textbook embeddings are unavailable".to_string(),
            ));
        }

        let request_body = EmbedRequest {
            texts: vec![text],
            model: &self.config.model,
            input_type: "search_document",
        };

        let url = format!("{}/embed", self.config.api_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Embedding(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::Embedding(format!(
                "Cohere embed request failed with status {}: {}",
                status, error_text
            )));
        }

        let data: EmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::Embedding(e.to_string()))?;

        let vector = data
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| Error::Embedding("Cohere returned no embeddings".to_string()))?;

        if vector.len() != COHERE_EMBED_DIMENSION {
            return Err(Error::Embedding(format!(
                "Cohere returned a {}-dimension vector, expected {}",
                vector.len(),
                COHERE_EMBED_DIMENSION
            )));
        }

        Ok(vector)
    }

    fn dimension(&self) -> usize {
        COHERE_EMBED_DIMENSION
    }
}
