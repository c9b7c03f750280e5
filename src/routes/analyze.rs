use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use tracing::{debug, info};

use crate::models::{AnalysisResponse, AppState, UploadedDocument};
use crate::types::{AppError, AppResult};

/// Multipart field carrying the document
const FILE_FIELD: &str = "file";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze_document))
        .with_state(state)
}

/// POST /analyze - Analyze one uploaded financial document
///
/// Always answers 200 once the upload has been read; only a malformed
/// multipart body or a missing `file` field is rejected.
async fn analyze_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let document = read_document(&mut multipart).await?;
    info!(filename = %document.filename, "Analyze request received");

    Ok(Json(state.analyzer.analyze(document).await))
}

async fn read_document(multipart: &mut Multipart) -> AppResult<UploadedDocument> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| "upload".to_string());
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidRequest(format!("Failed to read upload: {}", e)))?;

        return Ok(UploadedDocument {
            filename,
            content_type,
            bytes,
        });
    }

    Err(AppError::InvalidRequest(format!(
        "Missing multipart field `{}`",
        FILE_FIELD
    )))
}
