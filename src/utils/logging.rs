//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the GptBuddy application.

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer on drop and must be held until shutdown.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&config.file_path)?;
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "gptbuddy.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log an onboarding prompt handed to a user
pub fn log_onboarding_step(user_id: &str, step: usize, total_steps: usize) {
    info!(
        user_id = user_id,
        step = step,
        total_steps = total_steps,
        "Onboarding prompt issued"
    );
}

/// Log the reply about to be sent
pub fn log_reply(user_id: &str, reply: &str) {
    debug!(
        user_id = user_id,
        reply = %truncate_text(reply, 200),
        "Reply prepared"
    );
}

/// Log a rate-limited completion attempt
pub fn log_rate_limited(attempt: u32, max_attempts: u32, delay_ms: u64) {
    warn!(
        attempt = attempt,
        max_attempts = max_attempts,
        delay_ms = delay_ms,
        "Rate limit hit, retrying after delay"
    );
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}

/// Log database operations
pub fn log_database_operation(operation: &str, table: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation completed"
        );
    } else {
        error!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation failed"
        );
    }
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
