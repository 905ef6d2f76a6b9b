//! Textbook ingestion endpoints

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use serde_json::json;

use super::{ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct LoadReport {
    pub message: String,
    pub files_processed: usize,
    pub success_rate: String,
}

/// Walk the docs directory and upsert each markdown file.
///
/// Per-file failures are absorbed into the success rate; only an empty docs
/// directory or an unreachable store fails the request.
pub async fn load_textbook_data(
    State(state): State<AppState>,
) -> Result<Json<LoadReport>, ApiError> {
    state.store.ensure_collection().await?;

    let report = state.loader.load_dir(&state.docs_dir).await?;

    if report.files_processed == 0 {
        return Err(ApiError::not_found(
            "No textbook markdown files found in docs directory",
        ));
    }

    Ok(Json(LoadReport {
        message: format!(
            "Successfully loaded {} textbook files into the database",
            report.files_loaded
        ),
        files_processed: report.files_processed,
        success_rate: format!("{:.1}%", report.success_rate()),
    }))
}

/// Report collection reachability and point count.
pub async fn check_data_status(State(state): State<AppState>) -> Json<serde_json::Value> {
    match state.store.count().await {
        Ok(count) => Json(json!({
            "collection_exists": true,
            "vectors_count": count,
            "message": format!("Collection exists with {} vectors", count),
        })),
        Err(e) => Json(json!({
            "error": e.to_string(),
            "message": "Could not connect to vector database",
        })),
    }
}
