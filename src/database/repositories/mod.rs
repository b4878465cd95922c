//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod chat;

// Re-export repositories
pub use chat::{ChatRepository, ChatRecordSink};
