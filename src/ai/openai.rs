//! OpenAI chat-completions client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::ai::error_handler::classify_api_error;
use crate::ai::provider::{Completion, CompletionProvider, CompletionRequest, TokenUsage};
use crate::core::config::Settings;
use crate::error::{PolishError, Result};

/// Upper bound on a single API request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

/// OpenAI API client
pub struct OpenAiClient {
    client: Client,
    api_key: SecretString,
    model: String,
    endpoint: Url,
}

impl OpenAiClient {
    /// Create a new client against `api_base`
    pub fn new(api_key: SecretString, model: &str, api_base: &str) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let endpoint = completions_endpoint(api_base)?;

        Ok(Self {
            client,
            api_key,
            model: model.to_string(),
            endpoint,
        })
    }

    /// Client for the resolved settings, or `None` when no API key is set
    pub fn from_settings(settings: &Settings) -> Result<Option<Self>> {
        match &settings.api_key {
            Some(key) => Self::new(
                key.clone(),
                &settings.config.model,
                &settings.config.api_base,
            )
            .map(Some),
            None => Ok(None),
        }
    }

    /// Get the current model name
    pub fn model_name(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        debug!(endpoint = %self.endpoint, model = %self.model, "sending chat completion request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PolishError::Api(format!(
                        "request timed out after {}s",
                        REQUEST_TIMEOUT.as_secs()
                    ))
                } else {
                    PolishError::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(classify_api_error(status, &error_text));
        }

        let raw = response.text().await?;
        let chat: ChatResponse = serde_json::from_str(&raw)
            .map_err(|e| PolishError::MalformedResponse(format!("invalid JSON body ({})", e)))?;

        let usage = chat
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        let text = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| PolishError::MalformedResponse("no message content".to_string()))?;

        debug!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "chat completion finished"
        );

        Ok(Completion { text, usage })
    }
}

/// `{api_base}/chat/completions`
fn completions_endpoint(api_base: &str) -> Result<Url> {
    let base = format!("{}/", api_base.trim_end_matches('/'));
    Url::parse(&base)
        .and_then(|u| u.join("chat/completions"))
        .map_err(|e| PolishError::Config(format!("Invalid API base URL '{}': {}", api_base, e)))
}

// ─────────────────────────────────────────────────────────────────────────────
// OpenAI API Request/Response types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}
