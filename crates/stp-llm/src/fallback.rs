//! Primary/fallback routing across completion providers

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use stp_core::{CompletionConfig, CompletionProvider, Error, Result};

use crate::config::{GeminiConfig, GroqConfig, ProviderKind};
use crate::gemini::GeminiClient;
use crate::groq::GroqClient;

/// Quota-aware router over a primary and an optional secondary provider.
///
/// Only quota/rate exhaustion triggers the secondary; any other primary
/// failure propagates unchanged. The retry reuses the exact prompt and
/// parameters of the original call.
pub struct FallbackCompleter {
    primary: Arc<dyn CompletionProvider>,
    secondary: Option<Arc<dyn CompletionProvider>>,
}

impl FallbackCompleter {
    /// Create a router with explicit providers
    pub fn new(
        primary: Arc<dyn CompletionProvider>,
        secondary: Option<Arc<dyn CompletionProvider>>,
    ) -> Self {
        Self { primary, secondary }
    }

    /// Build the provider chain from environment configuration.
    ///
    /// The chain follows credential presence: with `LLM_PROVIDER=gemini`
    /// (the default), Gemini is primary and Groq, if configured, is the
    /// quota fallback. At least one completion credential is required.
    pub fn from_env() -> Result<Self> {
        let kind = ProviderKind::from_env()?;
        let gemini = GeminiConfig::from_env().ok();
        let groq = GroqConfig::from_env().ok();

        match kind {
            ProviderKind::Gemini => {
                if let Some(config) = gemini {
                    let primary: Arc<dyn CompletionProvider> =
                        Arc::new(GeminiClient::new(config)?);
                    let secondary = match groq {
                        Some(config) => {
                            Some(Arc::new(GroqClient::new(config)?) as Arc<dyn CompletionProvider>)
                        }
                        None => None,
                    };
                    Ok(Self::new(primary, secondary))
                } else if let Some(config) = groq {
                    // No Gemini key: serve everything from Groq directly.
                    Ok(Self::new(Arc::new(GroqClient::new(config)?), None))
                } else {
                    Err(Error::Configuration(
                        "no completion provider configured: set GEMINI_API_KEY or OPENAI_API_KEY \
                         (Groq) in .env"
                            .to_string(),
                    ))
                }
            }
            ProviderKind::Groq => {
                let config = groq.ok_or_else(|| {
                    Error::Configuration(
                        "LLM_PROVIDER=groq but GROQ_API_KEY/OPENAI_API_KEY is not set".to_string(),
                    )
                })?;
                Ok(Self::new(Arc::new(GroqClient::new(config)?), None))
            }
        }
    }

    /// Whether a secondary provider is configured.
    pub fn has_fallback(&self) -> bool {
        self.secondary.is_some()
    }
}

#[async_trait]
impl CompletionProvider for FallbackCompleter {
    async fn complete(
        &self,
        system_prompt: &str,
        user_content: &str,
        config: &CompletionConfig,
    ) -> Result<String> {
        match self.primary.complete(system_prompt, user_content, config).await {
            Ok(text) => Ok(text),
            Err(Error::QuotaExhausted(primary_err)) => {
                let Some(secondary) = &self.secondary else {
                    return Err(Error::QuotaExhausted(format!(
                        "{}. Set OPENAI_API_KEY in .env (console.groq.com) to enable the Groq \
                         fallback.",
                        primary_err
                    )));
                };

                warn!(
                    "{} quota exhausted, retrying on {}",
                    self.primary.name(),
                    secondary.name()
                );

                secondary
                    .complete(system_prompt, user_content, config)
                    .await
                    .map_err(|fallback_err| {
                        // Both backends are down; tell the caller which
                        // credential to fix, never the credential itself.
                        Error::QuotaExhausted(format!(
                            "{} quota exceeded and {} fallback failed: {}. Check OPENAI_API_KEY \
                             in .env is a valid Groq key (console.groq.com).",
                            self.primary.name(),
                            secondary.name(),
                            fallback_err
                        ))
                    })
            }
            Err(e) => Err(e),
        }
    }

    fn name(&self) -> &str {
        self.primary.name()
    }
}
