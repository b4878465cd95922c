//! Inbound message model

use serde::{Deserialize, Serialize};

/// A message received from the transport, reduced to what the dispatcher needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Conversation key, the chat identifier as a string
    pub user_id: String,
    /// Message text; `None` for stickers, photos and other non-text content
    pub text: Option<String>,
}

impl InboundMessage {
    pub fn new(user_id: impl Into<String>, text: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            text,
        }
    }

    /// Create a text message
    pub fn text(user_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(user_id, Some(text.into()))
    }

    /// Text content, empty for non-text messages
    pub fn content(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}
