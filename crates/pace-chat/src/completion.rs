//! Chat-completion backends.
//!
//! The proxy only needs "full ordered transcript in, reply text out", so the
//! upstream is abstracted behind [`ChatCompletion`]. [`OpenAiClient`] speaks
//! the OpenAI `/chat/completions` wire format, which most hosted and local
//! model servers also accept.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use pace_core::models::transcript::ChatMessage;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ChatError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Something that turns a transcript into the assistant's next reply.
pub trait ChatCompletion: Send + Sync {
    fn complete<'a>(
        &'a self,
        messages: &'a [ChatMessage],
    ) -> BoxFuture<'a, Result<String, ChatError>>;
}

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API root, e.g. `https://api.openai.com/v1`. `/chat/completions` is
    /// appended.
    pub base_url: String,
    /// Bearer token. Sent only when non-empty.
    pub api_key: String,
    pub model: String,
    /// Upper bound on one round-trip, connect included.
    pub timeout: Duration,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub struct OpenAiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, ChatError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChatError::Config(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key,
            model: config.model,
            timeout: config.timeout,
        })
    }

    async fn send(&self, messages: &[ChatMessage]) -> Result<String, ChatError> {
        let body = CompletionRequest {
            model: &self.model,
            messages,
        };

        let mut req = self.http.post(&self.endpoint).json(&body);
        if !self.api_key.is_empty() {
            req = req.bearer_auth(&self.api_key);
        }

        let resp = req.send().await.map_err(|e| {
            if e.is_timeout() {
                ChatError::Upstream(format!(
                    "request timed out after {}s",
                    self.timeout.as_secs()
                ))
            } else {
                ChatError::Upstream(e.to_string())
            }
        })?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ChatError::Upstream(e.to_string()))?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<ErrorEnvelope>(&bytes)
                .map(|env| env.error.message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
            return Err(ChatError::Upstream(format!("{status}: {detail}")));
        }

        let parsed: CompletionResponse = serde_json::from_slice(&bytes)
            .map_err(|e| ChatError::Upstream(format!("malformed completion response: {e}")))?;

        let reply = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ChatError::Upstream("completion response had no content".to_string()))?;

        debug!(model = %self.model, chars = reply.chars().count(), "completion received");

        Ok(reply.trim().to_string())
    }
}

impl ChatCompletion for OpenAiClient {
    fn complete<'a>(
        &'a self,
        messages: &'a [ChatMessage],
    ) -> BoxFuture<'a, Result<String, ChatError>> {
        Box::pin(self.send(messages))
    }
}
