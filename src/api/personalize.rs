//! Chapter personalization endpoint

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::auth::profile_or_guest;

use super::{ApiError, AppState, slug_or_unknown};

#[derive(Debug, Deserialize)]
pub struct PersonalizeRequest {
    #[serde(default)]
    pub chapter_slug: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct PersonalizeResponse {
    pub personalized_content: String,
    pub chapter_slug: String,
}

/// Rewrite a chapter for the caller's profile.
///
/// Unauthenticated callers (and invalid tokens) get the guest profile.
pub async fn personalize_chapter(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<PersonalizeRequest>,
) -> Result<Json<PersonalizeResponse>, ApiError> {
    let profile = profile_or_guest(state.profiles.as_ref(), &headers).await;

    let personalized = state
        .personalize
        .personalize(&request.content, &profile)
        .await?;

    Ok(Json(PersonalizeResponse {
        personalized_content: personalized,
        chapter_slug: slug_or_unknown(request.chapter_slug),
    }))
}
