//! RAG query engine: retrieve, assemble, generate, classify

use std::sync::Arc;
use tracing::warn;

use stp_core::{
    ChatAnswer, ChatQuery, CompletionConfig, CompletionProvider, EmbeddingProvider, Error, Result,
    SearchHit, SourceRef, VectorStore,
};

use crate::context::{MAX_CONTEXT_CHARS, assemble_context};
use crate::prompts::{DEGRADED_SYSTEM_PROMPT, TUTOR_SYSTEM_PROMPT, user_content};

/// Tunables for one engine instance.
#[derive(Debug, Clone)]
pub struct RagConfig {
    /// Number of hits requested from the store per query.
    pub top_k: u64,
    pub max_context_chars: usize,
    pub completion: CompletionConfig,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            max_context_chars: MAX_CONTEXT_CHARS,
            completion: CompletionConfig::default(),
        }
    }
}

/// The chat request pipeline over injected providers.
///
/// Each request runs retrieve → assemble → generate sequentially; a failure
/// in generation never retries or rolls back the retrieval, and identical
/// queries always re-embed and re-search.
pub struct RagEngine {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    llm: Arc<dyn CompletionProvider>,
    config: RagConfig,
}

impl RagEngine {
    /// Create an engine with default tunables
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        llm: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self {
            embedder,
            store,
            llm,
            config: RagConfig::default(),
        }
    }

    /// Override the default tunables
    pub fn with_config(mut self, config: RagConfig) -> Self {
        self.config = config;
        self
    }

    /// Answer one chat query.
    ///
    /// Retrieval failures (store unreachable, embedding provider down)
    /// degrade to generation without textbook context under an alternate
    /// system prompt; the degraded answer carries no sources.
    pub async fn answer(&self, request: &ChatQuery) -> Result<ChatAnswer> {
        let (hits, degraded_reason) = match self.retrieve(request).await {
            Ok(hits) => (hits, None),
            Err(e @ (Error::StoreUnavailable(_) | Error::Embedding(_))) => {
                warn!("retrieval degraded, answering without textbook context: {}", e);
                (Vec::new(), Some(e))
            }
            Err(e) => return Err(e),
        };

        let (context, included) = assemble_context(&hits, self.config.max_context_chars);

        let system_prompt = if degraded_reason.is_some() {
            DEGRADED_SYSTEM_PROMPT
        } else {
            TUTOR_SYSTEM_PROMPT
        };
        let user = user_content(&context, &request.query, &request.selected_context);

        let answer = match self
            .llm
            .complete(system_prompt, &user, &self.config.completion)
            .await
        {
            Ok(text) => text,
            Err(generation_err) => {
                return Err(match degraded_reason {
                    // Both legs of the pipeline are down; name each one.
                    Some(retrieval_err) => Error::Completion(format!(
                        "textbook index unreachable ({}) and the language model is also failing \
                         ({})",
                        retrieval_err, generation_err
                    )),
                    None => generation_err,
                });
            }
        };

        let sources = hits[..included].iter().map(source_from_hit).collect();

        Ok(ChatAnswer { answer, sources })
    }

    async fn retrieve(&self, request: &ChatQuery) -> Result<Vec<SearchHit>> {
        let combined = format!("{} {}", request.query, request.selected_context);
        let vector = self.embedder.embed(combined.trim()).await?;
        self.store.search(vector, self.config.top_k).await
    }
}

fn source_from_hit(hit: &SearchHit) -> SourceRef {
    SourceRef {
        chapter: hit.chapter_slug.clone(),
        section: hit.section_title.clone(),
        url: format!("/docs/{}", hit.chapter_slug),
    }
}
