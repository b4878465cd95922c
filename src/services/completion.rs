//! Completion client
//!
//! Wraps a single chat-completion call with bounded retry on rate limiting.
//! Capacity exhaustion degrades into a canned answer instead of an error, so
//! callers only ever see errors for genuine provider failures.

use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use crate::config::OpenAiConfig;
use crate::utils::errors::{GptBuddyError, ProviderResult, Result};
use crate::utils::logging::log_rate_limited;

/// Returned when the provider answers without any content
pub const NO_RESPONSE_FALLBACK: &str = "No response.";

/// Returned when every attempt was rate limited
pub const RATE_LIMIT_FALLBACK: &str =
    "Sorry, I am currently unavailable due to high traffic. Please try again later.";

/// One turn of a chat-completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat-completion request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// Chat-completion response body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionChoice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Content of the first choice, if the provider produced any
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
            .filter(|content| !content.is_empty())
    }
}

/// Language-model backend performing one completion request per call
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn create_chat_completion(&self, request: &CompletionRequest) -> ProviderResult<CompletionResponse>;
}

/// Completion client with fixed-delay retry on rate limiting
#[derive(Clone)]
pub struct CompletionClient {
    provider: Arc<dyn CompletionProvider>,
    model: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl CompletionClient {
    /// Create a new CompletionClient instance
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        model: impl Into<String>,
        max_retries: u32,
        retry_delay: Duration,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            max_retries,
            retry_delay,
        }
    }

    /// Create a client using the model and retry policy from configuration
    pub fn from_config(provider: Arc<dyn CompletionProvider>, config: &OpenAiConfig) -> Self {
        Self::new(
            provider,
            config.model.clone(),
            config.max_retries,
            Duration::from_millis(config.retry_delay_ms),
        )
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Ask the provider for a reply to `prompt`.
    ///
    /// Rate-limited attempts are retried after `retry_delay`, up to `max_retries`
    /// attempts in total; exhaustion yields [`RATE_LIMIT_FALLBACK`]. Any other
    /// provider failure is returned immediately as [`GptBuddyError::Provider`].
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(GptBuddyError::InvalidInput("Prompt text is empty".to_string()));
        }

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
        };

        for attempt in 1..=self.max_retries {
            debug!(attempt = attempt, model = %self.model, "Requesting completion");

            match self.provider.create_chat_completion(&request).await {
                Ok(response) => {
                    return Ok(response
                        .first_content()
                        .unwrap_or(NO_RESPONSE_FALLBACK)
                        .to_string());
                }
                Err(e) if e.is_rate_limited() => {
                    if attempt < self.max_retries {
                        log_rate_limited(attempt, self.max_retries, self.retry_delay.as_millis() as u64);
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(attempts = self.max_retries, "Rate limit exceeded after retries, returning fallback message");
        Ok(RATE_LIMIT_FALLBACK.to_string())
    }
}

impl std::fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionClient")
            .field("model", &self.model)
            .field("max_retries", &self.max_retries)
            .field("retry_delay", &self.retry_delay)
            .finish_non_exhaustive()
    }
}
