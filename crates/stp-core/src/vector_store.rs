//! Vector store trait and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Document, Result};

/// A similarity-search hit with the stored payload and its score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub text: String,
    pub chapter_slug: String,
    pub section_title: String,
    /// Cosine similarity, higher is more relevant.
    pub score: f32,
}

/// Trait for vector stores (e.g. Qdrant).
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create the backing collection if it does not exist. Idempotent.
    async fn ensure_collection(&self) -> Result<()>;

    /// Insert or replace the point for this document. All-or-nothing per call.
    async fn upsert(&self, document: &Document, vector: Vec<f32>) -> Result<()>;

    /// Return at most `limit` hits sorted by descending similarity.
    ///
    /// An index holding fewer than `limit` points returns fewer hits, never
    /// padding. Transport failures surface as `Error::StoreUnavailable` so
    /// the chat flow can degrade instead of failing outright.
    async fn search(&self, vector: Vec<f32>, limit: u64) -> Result<Vec<SearchHit>>;

    /// Number of points currently stored.
    async fn count(&self) -> Result<usize>;
}
