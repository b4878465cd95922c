//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{GptBuddyError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_openai_config(&settings.openai)?;
    validate_database_config(&settings.database)?;
    validate_onboarding_config(&settings.onboarding)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(GptBuddyError::Config(
            "Bot token is required".to_string()
        ));
    }

    Ok(())
}

/// Validate completion API configuration
fn validate_openai_config(config: &super::OpenAiConfig) -> Result<()> {
    if config.api_key.is_empty() {
        return Err(GptBuddyError::Config(
            "OpenAI API key is required".to_string()
        ));
    }

    if config.api_url.is_empty() {
        return Err(GptBuddyError::Config(
            "OpenAI API URL is required".to_string()
        ));
    }

    if url::Url::parse(&config.api_url).is_err() {
        return Err(GptBuddyError::Config(
            format!("OpenAI API URL is not a valid URL: {}", config.api_url)
        ));
    }

    if config.model.is_empty() {
        return Err(GptBuddyError::Config(
            "OpenAI model is required".to_string()
        ));
    }

    if config.max_retries == 0 {
        return Err(GptBuddyError::Config(
            "Max retries must be greater than 0".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(GptBuddyError::Config(
            "OpenAI timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(GptBuddyError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(GptBuddyError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(GptBuddyError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate onboarding questionnaire
fn validate_onboarding_config(config: &super::OnboardingConfig) -> Result<()> {
    if let Some(index) = config.prompts.iter().position(|prompt| prompt.trim().is_empty()) {
        return Err(GptBuddyError::Config(
            format!("Onboarding prompt #{} is empty", index + 1)
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(GptBuddyError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(GptBuddyError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    if config.file_path.is_empty() {
        return Err(GptBuddyError::Config(
            "Log file path is required".to_string()
        ));
    }

    Ok(())
}
