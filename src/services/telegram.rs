//! Telegram transport
//!
//! Sends replies through teloxide and converts incoming teloxide messages into
//! the transport-neutral [`InboundMessage`].

use async_trait::async_trait;
use teloxide::requests::Requester;
use teloxide::types::{ChatId, Message};
use teloxide::Bot;
use tracing::debug;
use crate::models::InboundMessage;
use crate::utils::errors::{GptBuddyError, Result};

/// Outbound side of the messaging transport
#[async_trait]
pub trait ReplySender: Send + Sync {
    /// Deliver `text` to the conversation identified by `user_id`
    async fn send_reply(&self, user_id: &str, text: &str) -> Result<()>;
}

/// Reply sender backed by the Telegram Bot API
#[derive(Clone)]
pub struct TelegramReplySender {
    bot: Bot,
}

impl TelegramReplySender {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ReplySender for TelegramReplySender {
    async fn send_reply(&self, user_id: &str, text: &str) -> Result<()> {
        let chat_id = parse_chat_id(user_id)?;
        self.bot.send_message(chat_id, text).await?;
        debug!(user_id = user_id, "Reply delivered");
        Ok(())
    }
}

/// Parse a conversation key back into a Telegram chat id
pub fn parse_chat_id(user_id: &str) -> Result<ChatId> {
    user_id
        .parse::<i64>()
        .map(ChatId)
        .map_err(|_| GptBuddyError::InvalidInput(format!("Not a Telegram chat id: {}", user_id)))
}

/// Reduce a Telegram message to the chat key and its text
pub fn inbound_from_message(msg: &Message) -> InboundMessage {
    InboundMessage::new(msg.chat.id.0.to_string(), msg.text().map(str::to_string))
}
