//! OpenAI chat-completions provider
//!
//! HTTP client for an OpenAI-compatible `/chat/completions` endpoint,
//! including client setup, response parsing and status classification.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;
use crate::config::OpenAiConfig;
use crate::utils::errors::{GptBuddyError, ProviderError, ProviderResult, Result};
use crate::utils::logging::log_api_error;
use super::completion::{CompletionProvider, CompletionRequest, CompletionResponse};

/// Completion provider backed by the OpenAI HTTP API
#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    api_url: String,
}

impl OpenAiProvider {
    /// Create a new OpenAiProvider instance
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("GptBuddy-Bot/1.0")
            .build()
            .map_err(GptBuddyError::Http)?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_url)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn create_chat_completion(&self, request: &CompletionRequest) -> ProviderResult<CompletionResponse> {
        let url = self.endpoint();
        debug!(url = %url, model = %request.model, "Making completion request");

        let response = self.client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log_api_error("openai", &format!("HTTP {}", status), Some(&error_text));

            return Err(if status == StatusCode::TOO_MANY_REQUESTS {
                ProviderError::RateLimited(error_text)
            } else {
                ProviderError::Status {
                    status: status.as_u16(),
                    message: error_text,
                }
            });
        }

        response.json::<CompletionResponse>().await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}
