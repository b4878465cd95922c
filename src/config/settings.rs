//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub openai: OpenAiConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub onboarding: OnboardingConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
}

/// Completion API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    /// Total number of attempts made while the provider keeps rate limiting
    pub max_retries: u32,
    /// Fixed pause between rate-limited attempts
    pub retry_delay_ms: u64,
    pub timeout_seconds: u64,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Onboarding questionnaire configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OnboardingConfig {
    pub prompts: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let defaults = Settings::default();

        let settings = config::Config::builder()
            .set_default("openai.api_url", defaults.openai.api_url)?
            .set_default("openai.model", defaults.openai.model)?
            .set_default("openai.max_retries", defaults.openai.max_retries)?
            .set_default("openai.retry_delay_ms", defaults.openai.retry_delay_ms)?
            .set_default("openai.timeout_seconds", defaults.openai.timeout_seconds)?
            .set_default("database.max_connections", defaults.database.max_connections)?
            .set_default("database.min_connections", defaults.database.min_connections)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.file_path", defaults.logging.file_path)?
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("GPTBUDDY")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("bot.token", std::env::var("TELEGRAM_TOKEN").ok())?
            .set_override_option("openai.api_key", std::env::var("OPENAI_API_KEY").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::GptBuddyError> {
        super::validation::validate_settings(self)
    }
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            prompts: vec![
                "What is your name?".to_string(),
                "Where are you from?".to_string(),
                "What is your nationality?".to_string(),
                "What is your age?".to_string(),
            ],
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
            },
            openai: OpenAiConfig {
                api_key: String::new(),
                api_url: "https://api.openai.com/v1".to_string(),
                model: "gpt-3.5-turbo".to_string(),
                max_retries: 3,
                retry_delay_ms: 5000,
                timeout_seconds: 60,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/gptbuddy".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            onboarding: OnboardingConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "logs".to_string(),
            },
        }
    }
}
