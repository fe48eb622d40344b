//! Lazily-loaded summarization model behind a single call

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;

use crate::config::InputConfig;
use crate::error::{Error, Result};
use crate::providers::SummarizationProvider;
use crate::types::{LengthBounds, SummaryLength};

/// Wraps a provider so the model is loaded once per process and every call
/// goes through the same length precondition.
pub struct SummarizationInvoker {
    provider: Arc<dyn SummarizationProvider>,
    loaded: OnceCell<()>,
    min_chars: usize,
}

impl SummarizationInvoker {
    pub fn new(provider: Arc<dyn SummarizationProvider>, input: &InputConfig) -> Self {
        Self {
            provider,
            loaded: OnceCell::new(),
            min_chars: input.min_chars,
        }
    }

    /// Minimum number of characters accepted
    pub fn min_chars(&self) -> usize {
        self.min_chars
    }

    pub fn provider(&self) -> &Arc<dyn SummarizationProvider> {
        &self.provider
    }

    /// Whether the model has been loaded
    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }

    /// Reject input below the minimum length without touching the model
    pub fn check_input(&self, text: &str) -> Result<()> {
        let chars = text.chars().count();
        if chars < self.min_chars {
            return Err(Error::InputTooShort {
                chars,
                min: self.min_chars,
            });
        }
        Ok(())
    }

    /// Summarize using a length preset
    pub async fn summarize_length(&self, text: &str, length: SummaryLength) -> Result<String> {
        self.summarize(text, length.bounds()).await
    }

    /// Summarize `text` within `bounds`; the result is trimmed
    pub async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String> {
        self.check_input(text)?;

        // A failed load leaves the cell empty so the next call retries it
        self.loaded
            .get_or_try_init(|| async {
                let start = Instant::now();
                self.provider.load().await?;
                tracing::info!(
                    "Model {} ready in {:.1}s",
                    self.provider.model(),
                    start.elapsed().as_secs_f64()
                );
                Ok::<(), Error>(())
            })
            .await?;

        let start = Instant::now();
        let summary = self.provider.summarize(text, bounds).await.map_err(|e| {
            tracing::error!("Summarization with {} failed: {}", self.provider.name(), e);
            match e {
                Error::Summarization(_) => e,
                other => Error::summarization(other.to_string()),
            }
        })?;

        let summary = summary.trim().to_string();
        if summary.is_empty() {
            return Err(Error::summarization("model returned an empty summary"));
        }

        tracing::info!(
            "Summarized {} chars into {} chars ({}-{} tokens) in {}ms",
            text.chars().count(),
            summary.chars().count(),
            bounds.min_length,
            bounds.max_length,
            start.elapsed().as_millis()
        );
        Ok(summary)
    }
}
