//! Configuration for the summarizer service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default Hugging Face summarization model
pub const DEFAULT_HF_MODEL: &str = "sshleifer/distilbart-cnn-12-6";
/// Default Hugging Face inference endpoint
pub const DEFAULT_HF_URL: &str = "https://router.huggingface.co/hf-inference/models";
/// Default Ollama model
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2:3b";
/// Default Ollama base URL
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Main summarizer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Summarization model configuration
    pub model: ModelConfig,
    /// Input limits
    pub input: InputConfig,
    /// Document extraction configuration
    pub extraction: ExtractionConfig,
    /// Interaction session configuration
    pub session: SessionConfig,
}

impl SummarizerConfig {
    /// Load configuration from an explicit file, the user config dir, or defaults,
    /// then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }

    /// `<config_dir>/notes-summarizer/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("notes-summarizer").join("config.toml"))
    }

    /// Apply `SUMMARIZER_*` and `HF_TOKEN` overrides using the given lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SUMMARIZER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SUMMARIZER_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| Error::Config(format!("Invalid SUMMARIZER_PORT: {}", port)))?;
        }
        if let Some(backend) = lookup("SUMMARIZER_BACKEND") {
            let backend: BackendProvider = backend.parse()?;
            if backend != self.model.backend {
                // Defaults belong to the previous backend
                self.model = ModelConfig::for_backend(backend);
            }
        }
        if let Some(model) = lookup("SUMMARIZER_MODEL") {
            self.model.model = model;
        }
        if let Some(url) = lookup("SUMMARIZER_MODEL_URL") {
            self.model.base_url = url;
        }
        if let Some(token) = lookup("HF_TOKEN").filter(|t| !t.is_empty()) {
            self.model.api_token = Some(token);
        }
        Ok(())
    }

    /// Reject configurations the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("server.port must be non-zero".to_string()));
        }
        if self.input.min_chars == 0 {
            return Err(Error::Config("input.min_chars must be at least 1".to_string()));
        }
        if self.model.model.trim().is_empty() {
            return Err(Error::Config("model.model must not be empty".to_string()));
        }
        if self.session.max_sessions == 0 {
            return Err(Error::Config("session.max_sessions must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 50MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8501,
            enable_cors: true,
            max_upload_size: 50 * 1024 * 1024, // 50MB
        }
    }
}

/// Summarization backend selection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendProvider {
    /// Hugging Face inference API (seq2seq summarization pipeline)
    #[default]
    HuggingFace,
    /// Local Ollama server
    Ollama,
}

impl std::str::FromStr for BackendProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            "ollama" => Ok(Self::Ollama),
            other => Err(Error::Config(format!("Unknown backend: {}", other))),
        }
    }
}

/// Summarization model configuration
///
/// `model` and `base_url` default per backend, so `backend = "ollama"` alone
/// selects the local defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawModelConfig")]
pub struct ModelConfig {
    /// Which backend runs the model
    pub backend: BackendProvider,
    /// Model identifier
    pub model: String,
    /// Backend base URL
    pub base_url: String,
    /// Bearer token (Hugging Face)
    pub api_token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ModelConfig {
    /// Defaults for a given backend
    pub fn for_backend(backend: BackendProvider) -> Self {
        let (model, base_url) = match backend {
            BackendProvider::HuggingFace => (DEFAULT_HF_MODEL, DEFAULT_HF_URL),
            BackendProvider::Ollama => (DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_URL),
        };
        Self {
            backend,
            model: model.to_string(),
            base_url: base_url.to_string(),
            api_token: None,
            timeout_secs: 300, // first call may include model start-up
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::for_backend(BackendProvider::default())
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawModelConfig {
    backend: BackendProvider,
    model: Option<String>,
    base_url: Option<String>,
    api_token: Option<String>,
    timeout_secs: Option<u64>,
}

impl From<RawModelConfig> for ModelConfig {
    fn from(raw: RawModelConfig) -> Self {
        let defaults = ModelConfig::for_backend(raw.backend);
        Self {
            backend: raw.backend,
            model: raw.model.unwrap_or(defaults.model),
            base_url: raw.base_url.unwrap_or(defaults.base_url),
            api_token: raw.api_token.filter(|t| !t.is_empty()),
            timeout_secs: raw.timeout_secs.unwrap_or(defaults.timeout_secs),
        }
    }
}

/// Input limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Minimum combined input length (characters) before summarizing
    pub min_chars: usize,
    /// Characters of extracted text shown in the preview
    pub preview_chars: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            min_chars: 50,
            preview_chars: 1500,
        }
    }
}

/// Document extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Timeout for extracting a single document in seconds
    pub timeout_secs: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self { timeout_secs: 60 }
    }
}

/// Interaction session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum live sessions kept in memory
    pub max_sessions: usize,
    /// Idle time after which a session is discarded (seconds)
    pub ttl_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: 1000,
            ttl_secs: 3600,
        }
    }
}
