//! Google Gemini chat-completion client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;

use stp_core::{
    CompletionConfig, CompletionProvider, EMPTY_COMPLETION_PLACEHOLDER, Error, Result,
};

use crate::classify_http_failure;
use crate::config::GeminiConfig;

/// Gemini client speaking the `generateContent` REST API.
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationParams,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationParams {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Deserialize)]
struct TextPart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    /// Create a new Gemini client from configuration
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a new Gemini client from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    async fn perform_completion(
        &self,
        system_prompt: &str,
        user_content: &str,
        config: &CompletionConfig,
    ) -> Result<String> {
        // Gemini takes a single prompt; the system prompt is prepended.
        let prompt = if system_prompt.is_empty() {
            user_content.to_string()
        } else {
            format!("{}\n\n{}", system_prompt, user_content)
        };

        let request_body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationParams {
                temperature: config.temperature,
                max_output_tokens: config.max_tokens,
            },
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.api_url, self.config.model, self.config.api_key
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(classify_http_failure("Gemini", status, &error_text));
        }

        let data: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        let text: String = data
            .candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect()
            })
            .unwrap_or_default();

        // Safety-filtered completions come back empty; substitute rather
        // than fail.
        if text.trim().is_empty() {
            return Ok(EMPTY_COMPLETION_PLACEHOLDER.to_string());
        }

        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl CompletionProvider for GeminiClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_content: &str,
        config: &CompletionConfig,
    ) -> Result<String> {
        let completion_future = self.perform_completion(system_prompt, user_content, config);

        match timeout(config.timeout, completion_future).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout(format!(
                "Gemini request exceeded {:?}",
                config.timeout
            ))),
        }
    }

    fn name(&self) -> &str {
        "Gemini"
    }
}
