//! Retrieval-augmented generation pipeline for the Smart Textbook Platform
//!
//! This crate provides the Cohere embedding client, the Qdrant vector-store
//! adapter, bounded context assembly, the RAG query engine, and the markdown
//! textbook loader.

mod cohere;
mod context;
mod engine;
mod loader;
mod prompts;
mod qdrant;


pub use cohere::{COHERE_EMBED_DIMENSION, CohereConfig, CohereEmbedder};
pub use context::{MAX_CONTEXT_CHARS, assemble_context, build_context};
pub use engine::{RagConfig, RagEngine};
pub use loader::{IngestReport, TextbookLoader};
pub use prompts::{DEGRADED_SYSTEM_PROMPT, TUTOR_SYSTEM_PROMPT};
pub use qdrant::{COLLECTION_NAME, QdrantStore};

// Re-export core types for convenience
pub use stp_core::{
    ChatAnswer, ChatQuery, Document, EmbeddingProvider, Error, Result, SearchHit, SourceRef,
    VectorStore,
};
