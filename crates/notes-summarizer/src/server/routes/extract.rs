//! Document text extraction endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::ExtractResponse;

use super::form::SummarizerForm;

/// POST /api/extract - Extract the text of an uploaded PDF
pub async fn extract_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractResponse>> {
    let form = SummarizerForm::read(multipart).await?;
    let file = form
        .file
        .ok_or_else(|| Error::InvalidRequest("Missing 'file' field".to_string()))?;

    let extraction = state
        .extractor()
        .extract(&file.filename, file.content_type.as_deref(), file.data)
        .await?;

    let (preview, truncated) = extraction.preview(state.config().input.preview_chars);
    Ok(Json(ExtractResponse {
        filename: file.filename,
        status: extraction.status(),
        page_count: extraction.page_count,
        stats: extraction.stats(),
        preview,
        truncated,
        text: extraction.text,
    }))
}
