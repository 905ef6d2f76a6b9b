//! Core traits and types for the Smart Textbook Platform
//!
//! This crate defines the fundamental traits and types used across the platform.
//! It provides capability-facing interfaces for embedding providers, vector stores,
//! and chat-completion providers, making the system test-friendly and extensible.

pub mod embedding;
pub mod error;
pub mod llm;
pub mod types;
pub mod vector_store;

pub use embedding::EmbeddingProvider;
pub use error::{Error, Result};
pub use llm::{CompletionConfig, CompletionProvider, EMPTY_COMPLETION_PLACEHOLDER};
pub use types::{ChatAnswer, ChatQuery, Document, ExperienceLevel, SourceRef, UserProfile};
pub use vector_store::{SearchHit, VectorStore};
