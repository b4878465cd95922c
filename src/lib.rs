//! GptBuddy Telegram Bot
//!
//! A Telegram bot that walks every new user through a short onboarding
//! questionnaire and afterwards answers free-form messages through a language
//! model, storing each exchange in PostgreSQL.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod database;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{GptBuddyError, ProviderError, Result};

// Re-export main components for easy access
pub use handlers::MessageDispatcher;
pub use services::{CompletionClient, ServiceFactory};
pub use state::{ConversationStateStore, OnboardingScript};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
