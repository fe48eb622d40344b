//! Application state for the summarizer server

use std::sync::Arc;

use crate::config::SummarizerConfig;
use crate::error::Result;
use crate::ingestion::PdfExtractor;
use crate::providers::{self, SummarizationProvider};
use crate::shell::SessionStore;
use crate::summarization::SummarizationInvoker;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: SummarizerConfig,
    /// PDF text extraction
    extractor: PdfExtractor,
    /// Model behind the load-once gate
    invoker: SummarizationInvoker,
    /// Interaction state per browser session
    sessions: SessionStore,
}

impl AppState {
    /// Create application state with the provider selected in `config`
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        let provider = providers::from_config(&config.model)?;
        Ok(Self::with_provider(config, provider))
    }

    /// Create application state around an existing provider
    pub fn with_provider(
        config: SummarizerConfig,
        provider: Arc<dyn SummarizationProvider>,
    ) -> Self {
        tracing::info!(
            "Initializing summarizer state (backend: {:?}, model: {})",
            config.model.backend,
            provider.model()
        );

        let extractor = PdfExtractor::new(&config.extraction);
        let invoker = SummarizationInvoker::new(provider, &config.input);
        let sessions = SessionStore::new(&config.session);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                extractor,
                invoker,
                sessions,
            }),
        }
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.inner.config
    }

    pub fn extractor(&self) -> &PdfExtractor {
        &self.inner.extractor
    }

    pub fn invoker(&self) -> &SummarizationInvoker {
        &self.inner.invoker
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.inner.sessions
    }

    /// Whether the summarization backend answers
    pub async fn is_ready(&self) -> bool {
        match self.inner.invoker.provider().health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                tracing::warn!("Backend health check failed: {}", e);
                false
            }
        }
    }
}
