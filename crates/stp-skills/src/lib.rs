//! Skill agents for the Smart Textbook Platform
//!
//! Each agent is a fixed system prompt plus deterministic pre/post-processing
//! around a `CompletionProvider`: quiz generation, profile-driven
//! personalization, and Urdu translation with protected code/LaTeX spans.

mod personalize;
mod quiz;
mod translate;

#[cfg(test)]
mod tests;

pub use personalize::PersonalizeAgent;
pub use quiz::QuizAgent;
pub use translate::{BLANK_TRANSLATION_URDU, EMPTY_CONTENT_URDU, TranslateAgent};

// Re-export core types for convenience
pub use stp_core::{CompletionConfig, CompletionProvider, Error, Result, UserProfile};
