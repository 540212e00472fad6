//! Chat platform configuration

use secrecy::{ExposeSecret, Secret};

use super::error::ValidationError;

/// Telegram Bot API configuration
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot token (`TELEGRAM_TOKEN` env var)
    bot_token: Secret<String>,

    /// Base URL for the Bot API
    pub base_url: String,

    /// Long-poll timeout passed to `getUpdates`, in seconds
    pub poll_timeout_secs: u64,
}

impl TelegramConfig {
    /// Creates a configuration with the given bot token and defaults.
    pub fn new(bot_token: Secret<String>) -> Self {
        Self {
            bot_token,
            base_url: default_base_url(),
            poll_timeout_secs: default_poll_timeout(),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the long-poll timeout.
    pub fn with_poll_timeout(mut self, secs: u64) -> Self {
        self.poll_timeout_secs = secs;
        self
    }

    /// Exposes the bot token (for building request URLs).
    pub fn bot_token(&self) -> &str {
        self.bot_token.expose_secret()
    }

    /// Validate platform configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bot_token().is_empty() {
            return Err(ValidationError::EmptyBotToken);
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_timeout() -> u64 {
    30
}
