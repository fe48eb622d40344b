//! notes-summarizer: abstractive summaries of PDFs and pasted notes
//!
//! Text is extracted from an uploaded PDF, merged with manually entered text,
//! summarized by a pretrained model (Hugging Face inference API or a local
//! Ollama server) and offered for download as TXT or PDF. The crate serves
//! both an interactive page and a JSON API.

pub mod config;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod providers;
pub mod server;
pub mod shell;
pub mod summarization;
pub mod types;

pub use config::SummarizerConfig;
pub use error::{Error, Result};
pub use export::{ExportArtifact, ExportFormat};
pub use server::SummarizerServer;
pub use summarization::SummarizationInvoker;
pub use types::{FinalText, LengthBounds, SummaryLength};
