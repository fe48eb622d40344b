//! Summarization provider trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::LengthBounds;

/// A pretrained summarization model behind a single inference call
///
/// Implementations:
/// - `HuggingFaceSummarizer`: hosted seq2seq pipeline (distilbart-cnn)
/// - `OllamaSummarizer`: local Ollama server
///
/// Implementations must be deterministic for identical inputs (no sampling).
#[async_trait]
pub trait SummarizationProvider: Send + Sync {
    /// Bring the model into memory; called once before the first summary
    async fn load(&self) -> Result<()>;

    /// Summarize `text` within the given output length bounds
    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model identifier
    fn model(&self) -> &str;
}
