//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid provider timeout")]
    InvalidTimeout,

    #[error("Telegram bot token must not be empty")]
    EmptyBotToken,

    #[error("Gemini API key must not be empty")]
    EmptyApiKey,

    #[error("Model name must not be empty")]
    EmptyModel,
}
