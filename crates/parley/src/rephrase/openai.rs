//! Completion client for OpenAI-compatible APIs
//!
//! Posts a system + user message pair to `{api_url}/chat/completions`.
//! Works with any endpoint that speaks the OpenAI chat format, with the
//! API key read from a configurable environment variable.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::config::RephraseConfig;
use crate::rephrase::client::CompletionClient;
use crate::rephrase::types::RephraseError;

/// Completion client using OpenAI-compatible HTTP APIs
#[derive(Debug)]
pub struct OpenAiCompletionClient {
    client: Client,
    config: RephraseConfig,
    endpoint: String,
    api_key: String,
}

/// OpenAI-compatible chat completion request
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

/// OpenAI-compatible chat completion response
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    /// Null when the model returns a refusal or tool call instead of text
    content: Option<String>,
}

impl OpenAiCompletionClient {
    /// Create a client, reading the API key from `config.api_key_env`
    ///
    /// Returns an error if the environment variable is not set.
    pub fn new(config: &RephraseConfig) -> Result<Self, RephraseError> {
        let api_key = env::var(&config.api_key_env).map_err(|_| {
            RephraseError::Config(format!(
                "API key env var '{}' not set",
                config.api_key_env
            ))
        })?;

        Self::with_api_key(config, api_key)
    }

    /// Create a client with an explicit API key
    pub fn with_api_key(config: &RephraseConfig, api_key: String) -> Result<Self, RephraseError> {
        let base = Url::parse(&config.api_url).map_err(|e| {
            RephraseError::Config(format!("Invalid api_url '{}': {e}", config.api_url))
        })?;
        let endpoint = format!("{}/chat/completions", base.as_str().trim_end_matches('/'));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RephraseError::Config(format!("Failed to create HTTP client: {e}")))?;

        info!(
            "Completion client initialized with model: {}, endpoint: {}",
            config.model, endpoint
        );

        Ok(Self {
            client,
            config: config.clone(),
            endpoint,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, RephraseError> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: [
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!("Calling completion API at: {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RephraseError::Network(format!("Request timed out: {e}"))
                } else if e.is_connect() {
                    RephraseError::Network(format!("Failed to connect: {e}"))
                } else {
                    RephraseError::Network(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RephraseError::Api(format!(
                "API returned {status}: {error_text}"
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| RephraseError::Parse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(RephraseError::EmptyResponse)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
