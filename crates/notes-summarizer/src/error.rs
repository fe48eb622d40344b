//! Error types for the summarizer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for summarizer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Summarizer errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The uploaded document could not be decoded
    #[error("Failed to extract text from '{filename}': {message}")]
    Extraction { filename: String, message: String },

    /// Malformed request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upload is not a PDF
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// Combined input is below the minimum length accepted by the model
    #[error("Input has {chars} characters; at least {min} are required")]
    InputTooShort { chars: usize, min: usize },

    /// Model invocation failed
    #[error("Summarization failed: {0}")]
    Summarization(String),

    /// Export requested without a summary
    #[error("No summary available to export")]
    NoSummary,

    /// Export formatting failed
    #[error("Export failed: {0}")]
    Export(String),

    /// HTTP transport error talking to a model backend
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an extraction error
    pub fn extraction(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extraction {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create a summarization error
    pub fn summarization(message: impl Into<String>) -> Self {
        Self::Summarization(message.into())
    }

    /// Create an export error
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Stable machine-readable error type used in API responses
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) => "config_error",
            Error::Extraction { .. } => "extraction_error",
            Error::InvalidRequest(_) => "invalid_request",
            Error::UnsupportedFileType(_) => "unsupported_type",
            Error::InputTooShort { .. } => "input_too_short",
            Error::Summarization(_) => "summarization_error",
            Error::NoSummary => "no_summary",
            Error::Export(_) => "export_error",
            Error::Http(_) => "http_error",
            Error::Internal(_) => "internal_error",
        }
    }

    /// HTTP status for the error
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Config(_) => StatusCode::BAD_REQUEST,
            Error::Extraction { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::UnsupportedFileType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Error::InputTooShort { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Summarization(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::NoSummary => StatusCode::CONFLICT,
            Error::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Http(_) => StatusCode::BAD_GATEWAY,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": {
                "type": self.kind(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}
