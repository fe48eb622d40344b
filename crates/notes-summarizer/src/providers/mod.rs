//! Summarization backends
//!
//! The provider trait lets the service switch between the hosted Hugging Face
//! pipeline and a local Ollama model without touching the invoker.

pub mod huggingface;
pub mod ollama;
pub mod summarizer;

use std::sync::Arc;

use crate::config::{BackendProvider, ModelConfig};
use crate::error::Result;

pub use huggingface::HuggingFaceSummarizer;
pub use ollama::OllamaSummarizer;
pub use summarizer::SummarizationProvider;

/// Build the provider selected in the configuration
pub fn from_config(config: &ModelConfig) -> Result<Arc<dyn SummarizationProvider>> {
    let provider: Arc<dyn SummarizationProvider> = match config.backend {
        BackendProvider::HuggingFace => Arc::new(HuggingFaceSummarizer::new(config)?),
        BackendProvider::Ollama => Arc::new(OllamaSummarizer::new(config)?),
    };
    tracing::info!("Summarization provider: {} ({})", provider.name(), provider.model());
    Ok(provider)
}
