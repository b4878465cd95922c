//! Error handling for GptBuddy
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for GptBuddy application
#[derive(Error, Debug)]
pub enum GptBuddyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Completion provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Completion provider specific errors
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("Provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Provider request failed: {0}")]
    RequestFailed(String),

    #[error("Provider request timeout")]
    Timeout,

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Whether the provider asked us to slow down (HTTP 429)
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ProviderError::RateLimited(_))
    }
}

/// Result type alias for GptBuddy operations
pub type Result<T> = std::result::Result<T, GptBuddyError>;

/// Result type alias for completion provider operations
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

impl GptBuddyError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            GptBuddyError::Database(_) => true,
            GptBuddyError::Migration(_) => false,
            GptBuddyError::Telegram(_) => true,
            GptBuddyError::Provider(_) => true,
            GptBuddyError::Config(_) => false,
            GptBuddyError::ConfigLoad(_) => false,
            GptBuddyError::Http(_) => true,
            GptBuddyError::Io(_) => true,
            GptBuddyError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GptBuddyError::Migration(_) => ErrorSeverity::Critical,
            GptBuddyError::Config(_) => ErrorSeverity::Critical,
            GptBuddyError::ConfigLoad(_) => ErrorSeverity::Critical,
            GptBuddyError::Provider(ProviderError::RateLimited(_)) => ErrorSeverity::Warning,
            GptBuddyError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
