//! Core types for the summarizer

pub mod length;
pub mod response;
pub mod text;

pub use length::{LengthBounds, SummaryLength};
pub use response::{
    ExportRequest, ExtractResponse, ExtractionStatus, SummarizeRequest, SummarizeResponse,
};
pub use text::{preview, FinalText, TextStats};
