//! Hosted completion providers for the Smart Textbook Platform
//!
//! This crate provides the Gemini and Groq implementations of the
//! `CompletionProvider` trait, plus the quota-aware primary/fallback router
//! used by the chat flow and the skill agents.

mod config;
mod fallback;
mod gemini;
mod groq;


pub use config::{GeminiConfig, GroqConfig, ProviderKind};
pub use fallback::FallbackCompleter;
pub use gemini::GeminiClient;
pub use groq::GroqClient;

// Re-export core types for convenience
pub use stp_core::{CompletionConfig, CompletionProvider, Error, Result};

/// Map a non-success provider response to an error category.
///
/// Quota and rate-limit signals are detected both from the status code and
/// from the body text, since providers differ in how they report exhaustion.
pub(crate) fn classify_http_failure(provider: &str, status: u16, body: &str) -> Error {
    let upper = body.to_uppercase();
    if status == 429
        || upper.contains("RESOURCE_EXHAUSTED")
        || upper.contains("QUOTA")
        || upper.contains("RATE LIMIT")
        || upper.contains("RATE_LIMIT")
    {
        Error::QuotaExhausted(format!(
            "{} request was rate limited (status {}): {}",
            provider, status, body
        ))
    } else if status == 401 || status == 403 {
        Error::Authentication(format!(
            "{} rejected the configured credential (status {}): {}",
            provider, status, body
        ))
    } else {
        Error::Completion(format!(
            "{} request failed with status {}: {}",
            provider, status, body
        ))
    }
}
