//! Per-session interaction state and the actions that drive it

use serde::Serialize;

use crate::error::{Error, Result};
use crate::export::{self, ExportArtifact, ExportFormat};
use crate::ingestion::{Extraction, PdfExtractor};
use crate::summarization::SummarizationInvoker;
use crate::types::{ExtractionStatus, FinalText, SummaryLength, TextStats};

/// Where the current interaction cycle stands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Idle,
    TextExtracted,
    Summarized,
    ArtifactsAvailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// Message shown once on the next render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Text extracted from the last successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedDocument {
    pub filename: String,
    pub page_count: usize,
    pub text: String,
}

impl From<(String, Extraction)> for LoadedDocument {
    fn from((filename, extraction): (String, Extraction)) -> Self {
        Self {
            filename,
            page_count: extraction.page_count,
            text: extraction.text,
        }
    }
}

/// Everything one browser session has accumulated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InteractionState {
    pub stage: Stage,
    pub document: Option<LoadedDocument>,
    pub manual_text: String,
    pub length: SummaryLength,
    pub summary: Option<String>,
    pub notices: Vec<Notice>,
}

impl InteractionState {
    /// Manual text followed by the extracted text
    pub fn final_text(&self) -> FinalText {
        let extracted = self.document.as_ref().map(|d| d.text.as_str()).unwrap_or("");
        FinalText::combine(&self.manual_text, extracted)
    }

    pub fn stats(&self) -> TextStats {
        self.final_text().stats()
    }

    pub fn has_summary(&self) -> bool {
        self.summary.is_some()
    }

    /// Remove and return pending notices
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Record the form fields submitted with any action
    pub fn set_inputs(&mut self, manual_text: Option<String>, length: Option<SummaryLength>) {
        if let Some(text) = manual_text {
            self.manual_text = text;
        }
        if let Some(length) = length {
            self.length = length;
        }
    }

    /// Extract text from an uploaded document.
    ///
    /// A successful extraction replaces the previous document and drops any
    /// summary. A document without text or a failed extraction leaves no
    /// extracted text behind, so generation continues with the manual text.
    pub async fn upload(
        &mut self,
        extractor: &PdfExtractor,
        filename: &str,
        content_type: Option<&str>,
        data: Vec<u8>,
    ) {
        match extractor.extract(filename, content_type, data).await {
            Ok(extraction) => match extraction.status() {
                ExtractionStatus::Extracted => {
                    self.document = Some((filename.to_string(), extraction).into());
                    self.summary = None;
                    self.stage = Stage::TextExtracted;
                    self.notices.push(Notice::success("PDF text extracted successfully!"));
                }
                ExtractionStatus::NoText => {
                    tracing::warn!("No text found in {}", filename);
                    self.discard_document();
                    self.notices
                        .push(Notice::warning("PDF uploaded but no text was extracted."));
                }
            },
            Err(e) => {
                tracing::warn!("Upload of {} failed: {}", filename, e);
                self.discard_document();
                let message = match e {
                    Error::Extraction { message, .. } => message,
                    other => other.to_string(),
                };
                self.notices
                    .push(Notice::error(format!("Failed to extract PDF text: {}", message)));
            }
        }
    }

    /// Forget the previous document and any summary built from it
    fn discard_document(&mut self) {
        if self.document.take().is_some() {
            self.summary = None;
            self.stage = Stage::Idle;
        }
    }

    /// Summarize the final text with the selected length.
    ///
    /// Input below the minimum is a warning and never reaches the model.
    pub async fn generate(&mut self, invoker: &SummarizationInvoker) {
        let text = self.final_text();

        match invoker.summarize_length(text.as_str(), self.length).await {
            Ok(summary) => {
                self.summary = Some(summary);
                self.stage = Stage::Summarized;
                self.notices.push(Notice::success("Summary generated!"));
            }
            Err(Error::InputTooShort { min, .. }) => {
                self.notices.push(Notice::warning(format!(
                    "Please enter at least {} characters or upload a PDF with text.",
                    min
                )));
            }
            Err(e) => {
                let message = match e {
                    Error::Summarization(message) => message,
                    other => other.to_string(),
                };
                self.notices
                    .push(Notice::error(format!("Error during summarization: {}", message)));
            }
        }
    }

    /// Build a download for the current summary
    pub fn export(&mut self, format: ExportFormat) -> Result<ExportArtifact> {
        let summary = self.summary.as_deref().ok_or(Error::NoSummary)?;
        let artifact = export::export(summary, format)?;
        self.stage = Stage::ArtifactsAvailable;
        Ok(artifact)
    }

    /// Back to the initial state
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
