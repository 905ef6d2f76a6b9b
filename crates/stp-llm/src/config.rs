//! Completion provider configuration

use serde::{Deserialize, Serialize};
use std::env;

use stp_core::{Error, Result};

/// Which hosted model backs the primary completion provider.
///
/// Resolved once at startup from `LLM_PROVIDER`; providers are never chosen
/// ad hoc per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    Groq,
}

impl ProviderKind {
    /// Read `LLM_PROVIDER` (default `gemini`).
    ///
    /// An unknown value is a configuration error rather than a silent
    /// default.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        match env::var("LLM_PROVIDER").as_deref() {
            Ok("gemini") | Err(_) => Ok(Self::Gemini),
            Ok("groq") => Ok(Self::Groq),
            Ok(other) => Err(Error::Configuration(format!(
                "unknown LLM_PROVIDER '{}': expected 'gemini' or 'groq'",
                other
            ))),
        }
    }
}

/// Configuration for the Gemini client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub api_url: String,
}

impl GeminiConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = env::var("GEMINI_API_KEY").map_err(|_| {
            Error::Configuration("GEMINI_API_KEY environment variable not found".to_string())
        })?;

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string());

        let api_url = env::var("GEMINI_API_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string());

        Ok(Self {
            api_key,
            model,
            api_url,
        })
    }

    /// Create configuration with explicit values
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: "gemini-2.5-flash".to_string(),
            api_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }
}

/// Configuration for the Groq client (OpenAI-compatible endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqConfig {
    pub api_key: String,
    pub model: String,
    pub api_url: String,
}

impl GroqConfig {
    /// Create configuration from environment variables.
    ///
    /// The Groq key historically lives in `OPENAI_API_KEY`; `GROQ_API_KEY`
    /// is accepted as the preferred spelling.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = env::var("GROQ_API_KEY")
            .or_else(|_| env::var("OPENAI_API_KEY"))
            .map_err(|_| {
                Error::Configuration(
                    "GROQ_API_KEY or OPENAI_API_KEY environment variable not found".to_string(),
                )
            })?;

        let model =
            env::var("GROQ_MODEL").unwrap_or_else(|_| "llama-3.3-70b-versatile".to_string());

        let api_url =
            env::var("GROQ_API_URL").unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string());

        Ok(Self {
            api_key,
            model,
            api_url,
        })
    }

    /// Create configuration with explicit values
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: "llama-3.3-70b-versatile".to_string(),
            api_url: "https://api.groq.com/openai/v1".to_string(),
        }
    }
}
