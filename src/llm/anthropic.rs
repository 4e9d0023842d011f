//! Anthropic Messages API client
//!
//! Async HTTP client for the hosted model endpoint. Retries and backoff are
//! the provider's concern; a failed request surfaces as a round-local error.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::core::config::API_KEY_ENV;
use crate::core::{Config, ContentBlock, Message, Result, TinkerError, ToolDefinition};
use crate::llm::traits::{ModelProvider, ModelRequest, ModelResponse, StopReason, TokenUsage};

/// Anthropic API client
#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    messages_url: String,
    api_key: String,
    version: String,
    debug: bool,
}

/// Messages API request body
#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    tools: &'a [ToolDefinition],
}

/// Messages API response body
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
    model: String,
    #[serde(default)]
    usage: Option<ApiUsage>,
}

/// Token counts as reported by the API
#[derive(Debug, Deserialize)]
struct ApiUsage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

impl AnthropicClient {
    /// Create a client from configuration
    ///
    /// Fails fast if the credential is not present in the environment.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = env::var(API_KEY_ENV).map_err(|_| TinkerError::MissingApiKey)?;
        if api_key.trim().is_empty() {
            return Err(TinkerError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            messages_url: config.messages_url(),
            api_key,
            version: config.api.version.clone(),
            debug: config.agent.debug,
        })
    }

    /// Debug print if enabled
    fn debug_print(&self, label: &str, content: &str) {
        if self.debug {
            if content.len() > 500 {
                eprintln!("DEBUG {}: {}...", label, &content[..500]);
            } else {
                eprintln!("DEBUG {}: {}", label, content);
            }
        }
    }
}

#[async_trait]
impl ModelProvider for AnthropicClient {
    async fn complete(&self, request: &ModelRequest) -> Result<ModelResponse> {
        let body = MessagesRequest {
            model: &request.model,
            max_tokens: request.max_tokens,
            system: request.system.as_deref(),
            messages: &request.messages,
            tools: &request.tools,
        };

        let request_json = serde_json::to_string(&body)?;
        self.debug_print("Request", &request_json);

        let response = self
            .client
            .post(&self.messages_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.version)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    TinkerError::api(format!(
                        "Cannot reach the API at {}: {}",
                        self.messages_url, e
                    ))
                } else {
                    TinkerError::from(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TinkerError::api(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        let response_text = response.text().await?;
        self.debug_print("Response", &response_text);

        let parsed: MessagesResponse = serde_json::from_str(&response_text)
            .map_err(|e| TinkerError::api(format!("Failed to parse response: {}", e)))?;

        Ok(ModelResponse {
            content: parsed.content,
            stop_reason: parsed
                .stop_reason
                .as_deref()
                .map(StopReason::parse)
                .unwrap_or(StopReason::EndTurn),
            model: parsed.model,
            usage: parsed.usage.map(|u| TokenUsage {
                input_tokens: u.input_tokens,
                output_tokens: u.output_tokens,
            }),
        })
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}
