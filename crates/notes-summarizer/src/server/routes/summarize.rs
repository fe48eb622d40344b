//! Summarization endpoint

use axum::{extract::State, Json};
use std::time::Instant;

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{FinalText, SummarizeRequest, SummarizeResponse};

/// POST /api/summarize - Summarize manual and/or extracted text
pub async fn summarize(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>> {
    let start = Instant::now();
    let text = FinalText::combine(&request.manual_text, &request.extracted_text);
    let bounds = request.length.bounds();

    tracing::info!(
        "Summarize request: {} chars, length {}",
        text.char_len(),
        request.length
    );

    let invoker = state.invoker();
    let summary = invoker.summarize(text.as_str(), bounds).await?;

    Ok(Json(SummarizeResponse {
        summary,
        length: request.length,
        min_length: bounds.min_length,
        max_length: bounds.max_length,
        stats: text.stats(),
        model: invoker.provider().model().to_string(),
        processing_time_ms: start.elapsed().as_millis() as u64,
    }))
}
