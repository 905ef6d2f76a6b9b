//! Urdu translation endpoint

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::warn;

use stp_core::Error;
use stp_skills::EMPTY_CONTENT_URDU;

use super::{ApiError, AppState, slug_or_unknown};

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub chapter_slug: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub translated_content: String,
    pub chapter_slug: String,
}

/// Translate a chapter to Urdu.
///
/// Empty content short-circuits to a fixed Urdu placeholder without touching
/// the model.
pub async fn translate_chapter(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let chapter_slug = slug_or_unknown(request.chapter_slug);

    if request.content.trim().is_empty() {
        return Ok(Json(TranslateResponse {
            translated_content: EMPTY_CONTENT_URDU.to_string(),
            chapter_slug,
        }));
    }

    let translated = match state.translate.translate(&request.content).await {
        Ok(text) => text,
        Err(e @ (Error::Authentication(_) | Error::Configuration(_))) => {
            warn!("translation configuration failure: {}", e);
            return Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Translation service is not properly configured. Please check API key settings.",
            ));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Json(TranslateResponse {
        translated_content: translated,
        chapter_slug,
    }))
}
