//! Embedding provider trait

use async_trait::async_trait;

use crate::Result;

/// Trait for text-embedding providers (e.g. Cohere).
///
/// One provider is pinned per collection: the collection is created with this
/// provider's dimension, and mixing providers against the same collection is
/// an invariant violation.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a piece of text into a fixed-dimension vector.
    ///
    /// Empty input is accepted and yields a provider-defined vector. Remote
    /// failures propagate as `Error::Embedding`; callers decide how to
    /// recover (ingestion continues with the next file, retrieval degrades
    /// to no-context generation).
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Fixed output dimension of this provider.
    fn dimension(&self) -> usize;
}
