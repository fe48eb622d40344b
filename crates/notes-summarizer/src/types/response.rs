//! Request and response types for the JSON API

use serde::{Deserialize, Serialize};

use super::length::SummaryLength;
use super::text::TextStats;

/// Outcome of a successful decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    /// Text was found
    Extracted,
    /// Document decoded but contains no text
    NoText,
}

/// POST /api/extract response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub filename: String,
    pub status: ExtractionStatus,
    pub page_count: usize,
    /// Full extracted text
    pub text: String,
    /// Text shown to the user, truncated with a marker
    pub preview: String,
    pub truncated: bool,
    pub stats: TextStats,
}

/// POST /api/summarize request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarizeRequest {
    /// Text typed by the user
    #[serde(default)]
    pub manual_text: String,
    /// Text previously extracted from a document
    #[serde(default)]
    pub extracted_text: String,
    /// Length preset (default: short)
    #[serde(default)]
    pub length: SummaryLength,
}

/// POST /api/summarize response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub length: SummaryLength,
    pub min_length: u32,
    pub max_length: u32,
    /// Counts over the combined input
    pub stats: TextStats,
    pub model: String,
    pub processing_time_ms: u64,
}

/// POST /api/export/{format} request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    pub summary: String,
}
