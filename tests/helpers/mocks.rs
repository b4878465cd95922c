//! In-process test doubles for the dispatcher's collaborators
//!
//! Scripted completion provider, recording chat sink and recording reply sender.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use async_trait::async_trait;
use chrono::Utc;
use GptBuddy::database::ChatRecordSink;
use GptBuddy::models::{ChatRecord, CreateChatRecordRequest};
use GptBuddy::services::{ReplySender, CompletionProvider, CompletionRequest, CompletionResponse};
use GptBuddy::services::completion::{ChoiceMessage, CompletionChoice};
use GptBuddy::utils::errors::{GptBuddyError, ProviderError, ProviderResult, Result};

type ResponseFactory = Box<dyn Fn() -> ProviderResult<CompletionResponse> + Send + Sync>;

/// Build a response whose first choice carries `content`
pub fn completion_response(content: &str) -> CompletionResponse {
    CompletionResponse {
        choices: vec![CompletionChoice {
            message: Some(ChoiceMessage {
                content: Some(content.to_string()),
            }),
        }],
    }
}

pub fn rate_limited() -> ProviderError {
    ProviderError::RateLimited("Rate limit reached".to_string())
}

pub fn server_error() -> ProviderError {
    ProviderError::Status {
        status: 500,
        message: "internal error".to_string(),
    }
}

/// Completion provider that plays back scripted results, then a default
pub struct MockCompletionProvider {
    scripted: Mutex<VecDeque<ProviderResult<CompletionResponse>>>,
    default: ResponseFactory,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockCompletionProvider {
    fn with_default(default: ResponseFactory) -> Self {
        Self {
            scripted: Mutex::new(VecDeque::new()),
            default,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with `content`
    pub fn replying(content: &str) -> Self {
        let content = content.to_string();
        Self::with_default(Box::new(move || Ok(completion_response(&content))))
    }

    /// Always answer with a response that has no choices
    pub fn empty() -> Self {
        Self::with_default(Box::new(|| Ok(CompletionResponse::default())))
    }

    /// Always signal rate limiting
    pub fn always_rate_limited() -> Self {
        Self::with_default(Box::new(|| Err(rate_limited())))
    }

    /// Always fail with HTTP 500
    pub fn always_failing() -> Self {
        Self::with_default(Box::new(|| Err(server_error())))
    }

    /// Queue results returned before the default kicks in
    pub fn then(self, result: ProviderResult<CompletionResponse>) -> Self {
        self.scripted.lock().unwrap().push_back(result);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn create_chat_completion(&self, request: &CompletionRequest) -> ProviderResult<CompletionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        let scripted = self.scripted.lock().unwrap().pop_front();
        match scripted {
            Some(result) => result,
            None => (self.default)(),
        }
    }
}

/// Chat sink that records every insert, optionally failing all of them
#[derive(Default)]
pub struct MockChatSink {
    pub fail: bool,
    records: Mutex<Vec<CreateChatRecordRequest>>,
    attempts: AtomicUsize,
}

impl MockChatSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Successfully stored records
    pub fn records(&self) -> Vec<CreateChatRecordRequest> {
        self.records.lock().unwrap().clone()
    }

    /// Inserts attempted, successful or not
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatRecordSink for MockChatSink {
    async fn insert(&self, request: CreateChatRecordRequest) -> Result<ChatRecord> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(GptBuddyError::Database(sqlx::Error::PoolTimedOut));
        }

        self.records.lock().unwrap().push(request.clone());
        Ok(ChatRecord {
            id: attempt as i64 + 1,
            user_id: request.user_id,
            user_message: request.user_message,
            bot_response: request.bot_response,
            created_at: Utc::now(),
        })
    }
}

/// Reply sender that records deliveries; the first `failures` sends fail
#[derive(Default)]
pub struct MockReplySender {
    failures: AtomicUsize,
    sent: Mutex<Vec<(String, String)>>,
    attempts: Mutex<Vec<(String, String)>>,
}

impl MockReplySender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the first `failures` sends
    pub fn failing_first(failures: usize) -> Self {
        Self {
            failures: AtomicUsize::new(failures),
            ..Self::default()
        }
    }

    /// Successfully delivered (user_id, text) pairs
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// Texts delivered to one user
    pub fn replies_to(&self, user_id: &str) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|(id, _)| id == user_id)
            .map(|(_, text)| text)
            .collect()
    }

    /// Every attempted (user_id, text) pair, including failed ones
    pub fn attempts(&self) -> Vec<(String, String)> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReplySender for MockReplySender {
    async fn send_reply(&self, user_id: &str, text: &str) -> Result<()> {
        self.attempts.lock().unwrap().push((user_id.to_string(), text.to_string()));

        let should_fail = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(GptBuddyError::InvalidInput("transport unavailable".to_string()));
        }

        self.sent.lock().unwrap().push((user_id.to_string(), text.to_string()));
        Ok(())
    }
}

/// Shared handles to the doubles wired into a dispatcher
pub struct TestDoubles {
    pub provider: Arc<MockCompletionProvider>,
    pub sink: Arc<MockChatSink>,
    pub sender: Arc<MockReplySender>,
}
