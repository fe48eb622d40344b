//! Ollama summarizer for local models

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ModelConfig;
use crate::error::{Error, Result};
use crate::summarization::PromptBuilder;
use crate::types::LengthBounds;

use super::summarizer::SummarizationProvider;

/// Fixed seed so identical inputs produce identical summaries
const SEED: i64 = 42;

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    seed: i64,
    num_predict: u32,
}

#[derive(Debug, Serialize)]
struct LoadRequest<'a> {
    model: &'a str,
    /// Negative keeps the model resident
    keep_alive: i64,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Summarizer backed by a local Ollama server
pub struct OllamaSummarizer {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaSummarizer {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    fn build_request(&self, text: &str, bounds: LengthBounds) -> GenerateRequest {
        GenerateRequest {
            model: self.model.clone(),
            prompt: PromptBuilder::build_summary_prompt(text, bounds),
            stream: false,
            options: GenerateOptions {
                temperature: 0.0,
                seed: SEED,
                num_predict: bounds.max_length,
            },
        }
    }
}

#[async_trait]
impl SummarizationProvider for OllamaSummarizer {
    async fn load(&self) -> Result<()> {
        tracing::info!("Loading summarization model {} (Ollama)", self.model);
        let url = format!("{}/api/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&LoadRequest {
                model: &self.model,
                keep_alive: -1,
            })
            .send()
            .await
            .map_err(|e| Error::summarization(format!("Model load request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await?;
            return Err(Error::summarization(format!(
                "Model load failed: HTTP {} - {}",
                status, body
            )));
        }
        Ok(())
    }

    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        let request = self.build_request(text, bounds);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::summarization(format!("Generation request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await?;
            return Err(Error::summarization(format!(
                "Generation failed: HTTP {} - {}",
                status, body
            )));
        }

        let generated: GenerateResponse = response.json().await.map_err(|e| {
            Error::summarization(format!("Failed to parse generation response: {}", e))
        })?;

        Ok(generated.response)
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendProvider;

    #[test]
    fn test_request_is_deterministic_and_capped() {
        let summarizer =
            OllamaSummarizer::new(&ModelConfig::for_backend(BackendProvider::Ollama)).unwrap();
        let request = summarizer.build_request(
            "Notes about qubits.",
            LengthBounds {
                min_length: 120,
                max_length: 300,
            },
        );
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "llama3.2:3b");
        assert_eq!(value["stream"], false);
        assert_eq!(value["options"]["temperature"], 0.0);
        assert_eq!(value["options"]["seed"], SEED);
        assert_eq!(value["options"]["num_predict"], 300);
        assert!(value["prompt"].as_str().unwrap().contains("Notes about qubits."));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = ModelConfig {
            base_url: "http://localhost:11434/".to_string(),
            ..ModelConfig::for_backend(BackendProvider::Ollama)
        };
        let summarizer = OllamaSummarizer::new(&config).unwrap();
        assert_eq!(summarizer.base_url, "http://localhost:11434");
    }
}
