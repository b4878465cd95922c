//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod chat;
pub mod message;

// Re-export commonly used models
pub use chat::{ChatRecord, CreateChatRecordRequest};
pub use message::InboundMessage;
