//! Message handlers module
//!
//! Drives every inbound message through the conversation state machine: users
//! first answer the onboarding questionnaire, then every message goes to the
//! completion client and the exchange is persisted.

use std::sync::Arc;
use teloxide::types::Message;
use tracing::{debug, error, info};
use crate::database::repositories::ChatRecordSink;
use crate::models::{CreateChatRecordRequest, InboundMessage};
use crate::services::telegram::inbound_from_message;
use crate::services::{CompletionClient, ReplySender, ServiceFactory};
use crate::state::ConversationStateStore;
use crate::utils::errors::{GptBuddyError, Result};
use crate::utils::logging::{log_onboarding_step, log_reply};

/// Sent when the completion provider fails with anything but rate limiting
pub const PROVIDER_ERROR_REPLY: &str = "Sorry, I encountered an error while processing your message.";

/// Sent when handling a message fails for any other reason
pub const GENERIC_ERROR_REPLY: &str = "An error occurred. Please try again.";

/// Per-message state machine shared by all update handlers
#[derive(Clone)]
pub struct MessageDispatcher {
    states: ConversationStateStore,
    completion_client: CompletionClient,
    chat_sink: Arc<dyn ChatRecordSink>,
    reply_sender: Arc<dyn ReplySender>,
}

impl MessageDispatcher {
    pub fn new(
        states: ConversationStateStore,
        completion_client: CompletionClient,
        chat_sink: Arc<dyn ChatRecordSink>,
        reply_sender: Arc<dyn ReplySender>,
    ) -> Self {
        Self {
            states,
            completion_client,
            chat_sink,
            reply_sender,
        }
    }

    /// Create a dispatcher from the service factory
    pub fn from_services(states: ConversationStateStore, services: &ServiceFactory) -> Self {
        Self::new(
            states,
            services.completion_client.clone(),
            services.chat_sink.clone(),
            services.reply_sender.clone(),
        )
    }

    pub fn states(&self) -> &ConversationStateStore {
        &self.states
    }

    /// Handle one inbound message and always try to answer it.
    ///
    /// Failures are logged and answered with [`GENERIC_ERROR_REPLY`]. Conversation
    /// state is not rolled back. An error is returned only when even that fallback
    /// reply could not be delivered.
    pub async fn handle_message(&self, inbound: &InboundMessage) -> Result<()> {
        if let Err(e) = self.process_message(inbound).await {
            error!(user_id = %inbound.user_id, error = %e, severity = %e.severity(), "Error handling message");
            if let Err(send_error) = self.reply_sender.send_reply(&inbound.user_id, GENERIC_ERROR_REPLY).await {
                error!(user_id = %inbound.user_id, error = %send_error, "Failed to send error reply");
                return Err(send_error);
            }
        }

        Ok(())
    }

    async fn process_message(&self, inbound: &InboundMessage) -> Result<()> {
        let reply = self.reply_for(inbound).await?;
        log_reply(&inbound.user_id, &reply);

        self.reply_sender.send_reply(&inbound.user_id, &reply).await
    }

    /// Decide the reply: next onboarding prompt, or a completion in free conversation
    async fn reply_for(&self, inbound: &InboundMessage) -> Result<String> {
        let user_id = inbound.user_id.as_str();

        if let Some((step, prompt)) = self.states.claim_onboarding_prompt(user_id) {
            log_onboarding_step(user_id, step + 1, self.states.script().len());
            return Ok(prompt);
        }

        let text = inbound.content();
        debug!(user_id = user_id, "Free conversation message");

        let reply = match self.completion_client.complete(text).await {
            Ok(reply) => reply,
            Err(GptBuddyError::Provider(e)) => {
                error!(user_id = user_id, error = %e, "Error with completion API");
                PROVIDER_ERROR_REPLY.to_string()
            }
            Err(e) => return Err(e),
        };

        self.save_exchange(user_id, text, &reply).await;

        Ok(reply)
    }

    /// Persist the exchange; failures never reach the user
    async fn save_exchange(&self, user_id: &str, text: &str, reply: &str) {
        let request = CreateChatRecordRequest {
            user_id: user_id.to_string(),
            user_message: text.to_string(),
            bot_response: reply.to_string(),
        };

        match self.chat_sink.insert(request).await {
            Ok(record) => {
                info!(user_id = user_id, record_id = record.id, "Saved chat exchange");
            }
            Err(e) => {
                error!(user_id = user_id, error = %e, "Error saving chat exchange");
            }
        }
    }
}

impl std::fmt::Debug for MessageDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageDispatcher")
            .field("states", &self.states)
            .field("completion_client", &self.completion_client)
            .finish_non_exhaustive()
    }
}

/// Handle incoming Telegram messages
pub async fn handle_message(msg: Message, dispatcher: Arc<MessageDispatcher>) -> Result<()> {
    let inbound = inbound_from_message(&msg);
    debug!(user_id = %inbound.user_id, has_text = inbound.text.is_some(), "Processing message");

    dispatcher.handle_message(&inbound).await
}
