//! RAG chat endpoint

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use stp_core::{ChatQuery, SourceRef};

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    #[serde(default)]
    pub selected_context: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
    pub sources: Vec<SourceRef>,
}

/// Answer a question against the textbook index.
///
/// Auth is advisory here; unauthenticated callers are served as guests. A
/// degraded retrieval still answers with 200 and an empty `sources` list.
pub async fn chat_with_textbook(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if request.query.trim().is_empty() {
        return Err(ApiError::bad_request("query must not be empty"));
    }

    let answer = state
        .engine
        .answer(&ChatQuery {
            query: request.query,
            selected_context: request.selected_context,
        })
        .await?;

    Ok(Json(ChatResponse {
        answer: answer.answer,
        sources: answer.sources,
    }))
}
