//! Quiz generation endpoint

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState, slug_or_unknown};

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub chapter_slug: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub content_with_quiz: String,
    pub chapter_slug: String,
}

/// Append a generated comprehension quiz to a chapter.
pub async fn quiz_chapter(
    State(state): State<AppState>,
    Json(request): Json<QuizRequest>,
) -> Result<Json<QuizResponse>, ApiError> {
    let content_with_quiz = state.quiz.generate(&request.content).await?;

    Ok(Json(QuizResponse {
        content_with_quiz,
        chapter_slug: slug_or_unknown(request.chapter_slug),
    }))
}
