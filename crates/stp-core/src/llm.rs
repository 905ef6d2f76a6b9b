//! Chat-completion provider trait and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::Result;

/// Placeholder substituted for blank model output.
pub const EMPTY_COMPLETION_PLACEHOLDER: &str = "I couldn't generate a response.";

/// Parameters for a single completion call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1000,
            timeout: Duration::from_secs(60),
        }
    }
}

/// Trait for hosted chat-completion models (Gemini, Groq, ...).
///
/// Implementations return the full completion text as a single unit; there is
/// no token-level streaming. A well-formed response with blank text is a soft
/// failure: implementations substitute [`EMPTY_COMPLETION_PLACEHOLDER`]
/// instead of returning an error.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a completion for a system prompt plus user content.
    async fn complete(
        &self,
        system_prompt: &str,
        user_content: &str,
        config: &CompletionConfig,
    ) -> Result<String>;

    /// Human-readable provider name, used in fallback diagnostics.
    fn name(&self) -> &str;
}
