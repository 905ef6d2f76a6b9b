//! HTTP interface: routes, schemas, and error mapping

mod chat;
mod data_loader;
mod error;
mod personalize;
mod quiz;
mod translate;

#[cfg(test)]
mod tests;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

use stp_core::VectorStore;
use stp_rag::{RagEngine, TextbookLoader};
use stp_skills::{PersonalizeAgent, QuizAgent, TranslateAgent};

use crate::auth::ProfileResolver;

pub use error::ApiError;

/// Shared handles for request handlers.
///
/// Everything here is a stateless client handle; no request data crosses
/// requests.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RagEngine>,
    pub store: Arc<dyn VectorStore>,
    pub loader: Arc<TextbookLoader>,
    pub quiz: Arc<QuizAgent>,
    pub personalize: Arc<PersonalizeAgent>,
    pub translate: Arc<TranslateAgent>,
    pub profiles: Arc<dyn ProfileResolver>,
    pub docs_dir: PathBuf,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/chat", post(chat::chat_with_textbook))
        .route("/api/personalize", post(personalize::personalize_chapter))
        .route("/api/translate", post(translate::translate_chapter))
        .route("/api/quiz", post(quiz::quiz_chapter))
        .route("/load-textbook-data", post(data_loader::load_textbook_data))
        .route("/check-data-status", get(data_loader::check_data_status))
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Physical AI Textbook API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Chapter slug echoed back in skill responses, `"unknown"` when absent.
pub(crate) fn slug_or_unknown(slug: String) -> String {
    if slug.trim().is_empty() {
        "unknown".to_string()
    } else {
        slug
    }
}
