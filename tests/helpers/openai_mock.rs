//! Mock completion API server
//!
//! Simulates the OpenAI `/chat/completions` endpoint with wiremock.

use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};
use GptBuddy::config::{OpenAiConfig, Settings};

pub const TEST_API_KEY: &str = "sk-test-key";

/// Mock OpenAI API server for testing
pub struct OpenAiMockServer {
    pub server: MockServer,
}

impl OpenAiMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Provider configuration pointing at this server
    pub fn config(&self) -> OpenAiConfig {
        let mut config = Settings::default().openai;
        config.api_key = TEST_API_KEY.to_string();
        config.api_url = format!("{}/v1", self.server.uri());
        config.timeout_seconds = 5;
        config
    }

    /// Answer every authorized completion request with `content`
    pub async fn mock_completion(&self, content: &str) {
        self.mock_raw(200, completion_body(content)).await;
    }

    /// Answer every completion request with the given status and body
    pub async fn mock_raw(&self, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", format!("Bearer {}", TEST_API_KEY).as_str()))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer the next `times` requests with HTTP 429
    pub async fn mock_rate_limited(&self, times: u64) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {"message": "Rate limit reached", "type": "requests"}
            })))
            .up_to_n_times(times)
            .mount(&self.server)
            .await;
    }

    /// Number of completion requests received so far
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|req| req.url.path() == "/v1/chat/completions")
            .count()
    }
}

/// Minimal successful completion body
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-3.5-turbo",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}
