//! Hugging Face inference API summarizer

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ModelConfig;
use crate::error::{Error, Result};
use crate::types::LengthBounds;

use super::summarizer::SummarizationProvider;

/// Text sent once to make the endpoint load the model
const WARM_UP_TEXT: &str = "The model is being loaded so that the first summary request does not wait for it.";

#[derive(Debug, Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
    parameters: SummarizationParameters,
    options: RequestOptions,
}

#[derive(Debug, Serialize)]
struct SummarizationParameters {
    min_length: u32,
    max_length: u32,
    do_sample: bool,
}

#[derive(Debug, Serialize)]
struct RequestOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Summaries(Vec<SummaryOutput>),
    Failure { error: String },
}

/// Summarizer backed by the Hugging Face inference API
pub struct HuggingFaceSummarizer {
    client: Client,
    endpoint: String,
    api_token: Option<String>,
    model: String,
}

impl HuggingFaceSummarizer {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/{}", config.base_url.trim_end_matches('/'), config.model),
            api_token: config.api_token.clone(),
            model: config.model.clone(),
        })
    }

    fn build_request(text: &str, bounds: LengthBounds) -> SummarizationRequest<'_> {
        SummarizationRequest {
            inputs: text,
            parameters: SummarizationParameters {
                min_length: bounds.min_length,
                max_length: bounds.max_length,
                do_sample: false,
            },
            options: RequestOptions {
                wait_for_model: true,
            },
        }
    }

    fn parse_response(body: &str) -> Result<String> {
        let parsed: InferenceResponse = serde_json::from_str(body).map_err(|e| {
            Error::summarization(format!("Unexpected response from inference API: {}", e))
        })?;

        match parsed {
            InferenceResponse::Summaries(outputs) => outputs
                .into_iter()
                .next()
                .map(|o| o.summary_text)
                .ok_or_else(|| Error::summarization("Inference API returned no summary")),
            InferenceResponse::Failure { error } => Err(Error::summarization(error)),
        }
    }

    /// Attach the API token, if one is configured
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn infer(&self, text: &str, bounds: LengthBounds) -> Result<String> {
        let request = self.authorized(
            self.client
                .post(&self.endpoint)
                .json(&Self::build_request(text, bounds)),
        );

        let response = request
            .send()
            .await
            .map_err(|e| Error::summarization(format!("Inference request failed: {}", e)))?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // The API reports model errors as {"error": "..."}
            let detail = match serde_json::from_str::<InferenceResponse>(&body) {
                Ok(InferenceResponse::Failure { error }) => error,
                _ => body,
            };
            return Err(Error::summarization(format!("HTTP {} - {}", status, detail)));
        }

        Self::parse_response(&body)
    }
}

#[async_trait]
impl SummarizationProvider for HuggingFaceSummarizer {
    async fn load(&self) -> Result<()> {
        tracing::info!("Loading summarization model {} (Hugging Face)", self.model);
        let bounds = LengthBounds {
            min_length: 5,
            max_length: 20,
        };
        self.infer(WARM_UP_TEXT, bounds).await.map(|_| ())
    }

    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String> {
        self.infer(text, bounds).await
    }

    async fn health_check(&self) -> Result<bool> {
        match self.authorized(self.client.head(&self.endpoint)).send().await {
            Ok(response) => Ok(!response.status().is_server_error()),
            Err(_) => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "huggingface"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
