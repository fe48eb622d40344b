//! Routes for the summarizer server

pub mod export;
pub mod extract;
pub mod form;
pub mod summarize;
pub mod ui;

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use crate::server::state::AppState;
use crate::types::SummaryLength;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Extraction - with larger body limit for file uploads
        .route(
            "/extract",
            post(extract::extract_document).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/summarize", post(summarize::summarize))
        .route("/export/:format", post(export::export_summary))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info(State(state): State<AppState>) -> Json<serde_json::Value> {
    let config = state.config();
    let invoker = state.invoker();
    let lengths: serde_json::Map<String, serde_json::Value> = SummaryLength::ALL
        .iter()
        .map(|length| {
            let bounds = length.bounds();
            (
                length.as_str().to_string(),
                serde_json::json!([bounds.min_length, bounds.max_length]),
            )
        })
        .collect();

    Json(serde_json::json!({
        "name": "notes-summarizer",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Abstractive summaries of uploaded PDFs and pasted notes",
        "model": {
            "backend": invoker.provider().name(),
            "name": invoker.provider().model(),
            "loaded": invoker.is_loaded(),
        },
        "input": {
            "min_chars": config.input.min_chars,
            "preview_chars": config.input.preview_chars,
            "max_upload_size": config.server.max_upload_size,
        },
        "lengths": lengths,
        "endpoints": {
            "GET /": "Interactive summarizer page",
            "POST /api/extract": "Extract text from a PDF (multipart field 'file')",
            "POST /api/summarize": "Summarize manual and/or extracted text",
            "POST /api/export/:format": "Download a summary as txt or pdf",
            "GET /api/info": "Service information",
            "GET /health": "Liveness",
            "GET /ready": "Backend reachability"
        }
    }))
}
