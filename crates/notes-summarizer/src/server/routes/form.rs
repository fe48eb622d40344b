//! Multipart form decoding shared by the page and the API

use axum::extract::Multipart;

use crate::error::{Error, Result};
use crate::types::SummaryLength;

/// A file part of a multipart body
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Fields the summarizer form can carry
#[derive(Debug, Default)]
pub struct SummarizerForm {
    pub file: Option<UploadedFile>,
    pub manual_text: Option<String>,
    pub length: Option<SummaryLength>,
}

impl SummarizerForm {
    /// Read every field; unknown fields are skipped and an empty file input
    /// counts as no file
    pub async fn read(mut multipart: Multipart) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| Error::InvalidRequest(format!("Failed to read multipart field: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "file" => {
                    let filename = field.file_name().unwrap_or("").to_string();
                    let content_type = field.content_type().map(|s| s.to_string());
                    let data = field.bytes().await.map_err(|e| {
                        Error::InvalidRequest(format!("Failed to read file: {}", e))
                    })?;
                    if filename.is_empty() && data.is_empty() {
                        continue;
                    }
                    tracing::info!("Received upload: {} ({} bytes)", filename, data.len());
                    form.file = Some(UploadedFile {
                        filename,
                        content_type,
                        data: data.to_vec(),
                    });
                }
                "manual_text" => {
                    let text = field.text().await.map_err(|e| {
                        Error::InvalidRequest(format!("Failed to read manual_text: {}", e))
                    })?;
                    form.manual_text = Some(text);
                }
                "length" => {
                    let value = field.text().await.map_err(|e| {
                        Error::InvalidRequest(format!("Failed to read length: {}", e))
                    })?;
                    form.length = Some(
                        value
                            .parse()
                            .map_err(|_| Error::InvalidRequest(format!("Unknown length '{}'", value)))?,
                    );
                }
                other => {
                    tracing::debug!("Ignoring form field '{}'", other);
                }
            }
        }

        Ok(form)
    }
}
