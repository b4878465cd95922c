//! Services module
//!
//! This module contains the clients for the external collaborators: the
//! completion API and the Telegram transport

pub mod completion;
pub mod openai;
pub mod telegram;

// Re-export commonly used services
pub use completion::{CompletionClient, CompletionProvider, CompletionRequest, CompletionResponse, ChatMessage, NO_RESPONSE_FALLBACK, RATE_LIMIT_FALLBACK};
pub use openai::OpenAiProvider;
pub use telegram::{ReplySender, TelegramReplySender};

use std::sync::Arc;
use teloxide::Bot;
use crate::config::settings::Settings;
use crate::database::repositories::{ChatRecordSink, ChatRepository};
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub completion_client: CompletionClient,
    pub reply_sender: Arc<dyn ReplySender>,
    pub chat_sink: Arc<dyn ChatRecordSink>,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(
        bot: Bot,
        settings: &Settings,
        chat_repository: ChatRepository,
    ) -> Result<Self> {
        let provider = OpenAiProvider::new(&settings.openai)?;
        let completion_client = CompletionClient::from_config(Arc::new(provider), &settings.openai);

        Ok(Self {
            completion_client,
            reply_sender: Arc::new(TelegramReplySender::new(bot)),
            chat_sink: Arc::new(chat_repository),
        })
    }

    /// Assemble a factory from already built collaborators
    pub fn from_parts(
        completion_client: CompletionClient,
        reply_sender: Arc<dyn ReplySender>,
        chat_sink: Arc<dyn ChatRecordSink>,
    ) -> Self {
        Self {
            completion_client,
            reply_sender,
            chat_sink,
        }
    }
}

impl std::fmt::Debug for ServiceFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceFactory")
            .field("completion_client", &self.completion_client)
            .finish_non_exhaustive()
    }
}
