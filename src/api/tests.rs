//! Handler tests over in-memory provider doubles

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use tempfile::TempDir;

use stp_core::{
    CompletionConfig, CompletionProvider, Document, EmbeddingProvider, Error, Result, SearchHit,
    VectorStore,
};
use stp_rag::{RagEngine, TextbookLoader};
use stp_skills::{EMPTY_CONTENT_URDU, PersonalizeAgent, QuizAgent, TranslateAgent};

use crate::auth::GuestProfiles;

use super::chat::{ChatRequest, chat_with_textbook};
use super::data_loader::{check_data_status, load_textbook_data};
use super::personalize::{PersonalizeRequest, personalize_chapter};
use super::quiz::{QuizRequest, quiz_chapter};
use super::translate::{TranslateRequest, translate_chapter};
use super::AppState;

struct StaticEmbedder;

#[async_trait]
impl EmbeddingProvider for StaticEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![0.1; 4])
    }

    fn dimension(&self) -> usize {
        4
    }
}

struct StaticStore {
    hits: Vec<SearchHit>,
}

#[async_trait]
impl VectorStore for StaticStore {
    async fn ensure_collection(&self) -> Result<()> {
        Ok(())
    }

    async fn upsert(&self, _document: &Document, _vector: Vec<f32>) -> Result<()> {
        Ok(())
    }

    async fn search(&self, _vector: Vec<f32>, limit: u64) -> Result<Vec<SearchHit>> {
        Ok(self.hits.iter().take(limit as usize).cloned().collect())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.hits.len())
    }
}

struct DownStore;

#[async_trait]
impl VectorStore for DownStore {
    async fn ensure_collection(&self) -> Result<()> {
        Err(Error::StoreUnavailable("connection refused".to_string()))
    }

    async fn upsert(&self, _document: &Document, _vector: Vec<f32>) -> Result<()> {
        Err(Error::StoreUnavailable("connection refused".to_string()))
    }

    async fn search(&self, _vector: Vec<f32>, _limit: u64) -> Result<Vec<SearchHit>> {
        Err(Error::StoreUnavailable("connection refused".to_string()))
    }

    async fn count(&self) -> Result<usize> {
        Err(Error::StoreUnavailable("connection refused".to_string()))
    }
}

struct ScriptedLlm {
    reply: &'static str,
    calls: AtomicUsize,
    last_user_content: Mutex<Option<String>>,
}

impl ScriptedLlm {
    fn replying(reply: &'static str) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            last_user_content: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_user_content(&self) -> String {
        self.last_user_content
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_default()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedLlm {
    async fn complete(
        &self,
        _system_prompt: &str,
        user_content: &str,
        _config: &CompletionConfig,
    ) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_user_content.lock().unwrap() = Some(user_content.to_string());
        Ok(self.reply.to_string())
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}

fn test_state(
    store: Arc<dyn VectorStore>,
    llm: Arc<dyn CompletionProvider>,
    docs_dir: PathBuf,
) -> AppState {
    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(StaticEmbedder);
    AppState {
        engine: Arc::new(RagEngine::new(embedder.clone(), store.clone(), llm.clone())),
        loader: Arc::new(TextbookLoader::new(embedder, store.clone())),
        store,
        quiz: Arc::new(QuizAgent::new(llm.clone())),
        personalize: Arc::new(PersonalizeAgent::new(llm.clone())),
        translate: Arc::new(TranslateAgent::new(llm)),
        profiles: Arc::new(GuestProfiles),
        docs_dir,
    }
}

fn node_hit() -> SearchHit {
    SearchHit {
        text: "A node is a process that performs computation.".to_string(),
        chapter_slug: "chapter-2".to_string(),
        section_title: "Nodes".to_string(),
        score: 0.92,
    }
}

#[tokio::test]
async fn chat_answers_with_cited_sources() {
    let store = Arc::new(StaticStore {
        hits: vec![node_hit()],
    });
    let llm = ScriptedLlm::replying("A node is a process. See Chapter 2.1: Nodes");
    let state = test_state(store, llm, PathBuf::new());

    let response = chat_with_textbook(
        State(state),
        Json(ChatRequest {
            query: "What is a robot node?".to_string(),
            selected_context: String::new(),
        }),
    )
    .await
    .unwrap();

    assert_eq!(response.0.answer, "A node is a process. See Chapter 2.1: Nodes");
    assert_eq!(response.0.sources.len(), 1);
    assert_eq!(response.0.sources[0].chapter, "chapter-2");
    assert_eq!(response.0.sources[0].section, "Nodes");
    assert_eq!(response.0.sources[0].url, "/docs/chapter-2");
}

#[tokio::test]
async fn chat_still_succeeds_when_the_store_is_down() {
    let llm = ScriptedLlm::replying("Speaking generally, a node is a process.");
    let state = test_state(Arc::new(DownStore), llm, PathBuf::new());

    let response = chat_with_textbook(
        State(state),
        Json(ChatRequest {
            query: "What is a robot node?".to_string(),
            selected_context: String::new(),
        }),
    )
    .await
    .unwrap();

    assert!(!response.0.answer.is_empty());
    assert!(response.0.sources.is_empty());
}

#[tokio::test]
async fn chat_rejects_an_empty_query() {
    let llm = ScriptedLlm::replying("unused");
    let state = test_state(Arc::new(DownStore), llm.clone(), PathBuf::new());

    let err = chat_with_textbook(
        State(state),
        Json(ChatRequest {
            query: "   ".to_string(),
            selected_context: String::new(),
        }),
    )
    .await
    .unwrap_err();

    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn translate_empty_content_never_calls_the_model() {
    let llm = ScriptedLlm::replying("unused");
    let state = test_state(Arc::new(DownStore), llm.clone(), PathBuf::new());

    let response = translate_chapter(
        State(state),
        Json(TranslateRequest {
            chapter_slug: String::new(),
            content: String::new(),
        }),
    )
    .await
    .unwrap();

    assert_eq!(response.0.translated_content, EMPTY_CONTENT_URDU);
    assert_eq!(response.0.chapter_slug, "unknown");
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn translate_echoes_the_chapter_slug() {
    let llm = ScriptedLlm::replying("اردو متن");
    let state = test_state(Arc::new(DownStore), llm, PathBuf::new());

    let response = translate_chapter(
        State(state),
        Json(TranslateRequest {
            chapter_slug: "chapter-3".to_string(),
            content: "Robots are machines.".to_string(),
        }),
    )
    .await
    .unwrap();

    assert_eq!(response.0.translated_content, "اردو متن");
    assert_eq!(response.0.chapter_slug, "chapter-3");
}

#[tokio::test]
async fn personalize_serves_guests_with_the_default_profile() {
    let llm = ScriptedLlm::replying("rewritten for you");
    let state = test_state(Arc::new(DownStore), llm.clone(), PathBuf::new());

    let response = personalize_chapter(
        State(state),
        HeaderMap::new(),
        Json(PersonalizeRequest {
            chapter_slug: "chapter-1".to_string(),
            content: "# Robots\n\nIntro.".to_string(),
        }),
    )
    .await
    .unwrap();

    assert_eq!(response.0.personalized_content, "rewritten for you");
    assert_eq!(response.0.chapter_slug, "chapter-1");
    assert!(llm.last_user_content().contains("beginner experience level"));
    assert!(
        llm.last_user_content()
            .contains("no specific programming background")
    );
}

#[tokio::test]
async fn quiz_appends_to_the_chapter() {
    let llm = ScriptedLlm::replying("## Check Your Understanding\n\n:::note Question 1\n:::");
    let state = test_state(Arc::new(DownStore), llm, PathBuf::new());

    let response = quiz_chapter(
        State(state),
        Json(QuizRequest {
            chapter_slug: String::new(),
            content: "# Sensors\n\nSensors measure the world.".to_string(),
        }),
    )
    .await
    .unwrap();

    assert!(response.0.content_with_quiz.starts_with("# Sensors"));
    assert!(
        response
            .0
            .content_with_quiz
            .contains("## Check Your Understanding")
    );
    assert_eq!(response.0.chapter_slug, "unknown");
}

#[tokio::test]
async fn ingestion_reports_partial_failures_without_aborting() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("good.md"), "# Good\n\ntext\n").unwrap();
    std::fs::write(dir.path().join("corrupt.md"), [0xff, 0xfe, 0x00]).unwrap();

    let llm = ScriptedLlm::replying("unused");
    let store = Arc::new(StaticStore { hits: Vec::new() });
    let state = test_state(store, llm, dir.path().to_path_buf());

    let response = load_textbook_data(State(state)).await.unwrap();

    assert_eq!(response.0.files_processed, 2);
    assert_eq!(response.0.success_rate, "50.0%");
    assert!(response.0.message.contains("1 textbook files"));
}

#[tokio::test]
async fn ingestion_of_an_empty_directory_is_not_found() {
    let dir = TempDir::new().unwrap();
    let llm = ScriptedLlm::replying("unused");
    let store = Arc::new(StaticStore { hits: Vec::new() });
    let state = test_state(store, llm, dir.path().to_path_buf());

    let err = load_textbook_data(State(state)).await.unwrap_err();

    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn data_status_reports_an_unreachable_store() {
    let llm = ScriptedLlm::replying("unused");
    let state = test_state(Arc::new(DownStore), llm, PathBuf::new());

    let response = check_data_status(State(state)).await;

    assert_eq!(
        response.0["message"],
        "Could not connect to vector database"
    );
}

#[tokio::test]
async fn data_status_reports_the_point_count() {
    let llm = ScriptedLlm::replying("unused");
    let store = Arc::new(StaticStore {
        hits: vec![node_hit()],
    });
    let state = test_state(store, llm, PathBuf::new());

    let response = check_data_status(State(state)).await;

    assert_eq!(response.0["collection_exists"], true);
    assert_eq!(response.0["vectors_count"], 1);
}
