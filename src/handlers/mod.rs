//! Bot handlers module
//!
//! This module contains the Telegram update handlers. Every private or group
//! text message goes through the message dispatcher.

pub mod messages;

// Re-export commonly used handler functions
pub use messages::{handle_message, MessageDispatcher, GENERIC_ERROR_REPLY, PROVIDER_ERROR_REPLY};
