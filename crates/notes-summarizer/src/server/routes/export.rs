//! Summary download endpoint

use axum::{
    extract::Path,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::Result;
use crate::export::{self, ExportArtifact, ExportFormat};
use crate::types::ExportRequest;

/// Attachment response for an artifact
pub fn artifact_response(artifact: ExportArtifact) -> Response {
    (
        [
            (header::CONTENT_TYPE, artifact.content_type().to_string()),
            (header::CONTENT_DISPOSITION, artifact.content_disposition()),
        ],
        artifact.bytes,
    )
        .into_response()
}

/// POST /api/export/:format - Render a summary as TXT or PDF
pub async fn export_summary(
    Path(format): Path<ExportFormat>,
    Json(request): Json<ExportRequest>,
) -> Result<Response> {
    let artifact = export::export(&request.summary, format)?;
    Ok(artifact_response(artifact))
}
