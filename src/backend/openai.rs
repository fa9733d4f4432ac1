//! OpenAI-compatible chat completion backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, header::RETRY_AFTER};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::BackendConfig;
use crate::error::{EngineError, EngineResult};

use super::{BackendError, ReasoningBackend};

/// Calls an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct OpenAiBackend {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout_secs: u64,
}

impl std::fmt::Debug for OpenAiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiBackend")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiBackend {
    /// Creates a backend with an explicit API key.
    pub fn new(config: &BackendConfig, api_key: impl Into<String>) -> EngineResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EngineError::InvalidConfig {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout_secs: config.timeout_secs,
        })
    }

    /// Creates a backend reading the API key from the configured variable.
    pub fn from_env(config: &BackendConfig) -> EngineResult<Self> {
        let api_key =
            std::env::var(&config.api_key_env).map_err(|_| EngineError::InvalidConfig {
                message: format!("environment variable {} is not set", config.api_key_env),
            })?;
        Self::new(config, api_key)
    }

    fn request_body<'a>(&'a self, system: &'a str, user: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl ReasoningBackend for OpenAiBackend {
    async fn generate(&self, system: &str, user: &str) -> Result<String, BackendError> {
        debug!(endpoint = %self.endpoint, model = %self.model, "Calling reasoning backend");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(system, user))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Timeout {
                        seconds: self.timeout_secs,
                    }
                } else {
                    BackendError::Unavailable {
                        message: e.to_string(),
                    }
                }
            })?;

        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let status = response.status();
        if let Some(error) = classify_status(status, retry_after.as_deref(), self.timeout_secs) {
            warn!(status = %status, error = %error, "Reasoning backend rejected call");
            return Err(error);
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::Timeout {
                    seconds: self.timeout_secs,
                }
            } else {
                BackendError::Unavailable {
                    message: format!("malformed response body: {}", e),
                }
            }
        })?;

        extract_content(body)
    }
}

/// Maps a non-success HTTP status to a backend error.
fn classify_status(
    status: StatusCode,
    retry_after: Option<&str>,
    timeout_secs: u64,
) -> Option<BackendError> {
    if status.is_success() {
        return None;
    }
    Some(match status {
        StatusCode::TOO_MANY_REQUESTS => BackendError::RateLimited {
            retry_after_secs: retry_after.and_then(|v| v.trim().parse().ok()),
        },
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => BackendError::Timeout {
            seconds: timeout_secs,
        },
        other => BackendError::Unavailable {
            message: format!("HTTP {}", other),
        },
    })
}

/// Pulls the first completion's text out of a response.
fn extract_content(body: ChatResponse) -> Result<String, BackendError> {
    body.choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.unwrap_or_default())
        .ok_or_else(|| BackendError::Unavailable {
            message: "response contained no choices".to_string(),
        })
}
