//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. The bot keeps the flat variable names its
//! hosting platform expects (`TELEGRAM_TOKEN`, `GEMINI_API_KEY`, `PORT`)
//! rather than a prefixed scheme.
//!
//! # Example
//!
//! ```no_run
//! use chat_courier::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Liveness endpoint on {}", config.server.socket_addr());
//! ```

mod ai;
mod error;
mod server;
mod telegram;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use server::ServerConfig;
pub use telegram::TelegramConfig;

use secrecy::Secret;
use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Liveness server configuration (host, port)
    pub server: ServerConfig,

    /// Chat platform configuration (Telegram Bot API)
    pub telegram: TelegramConfig,

    /// Completion provider configuration (Gemini)
    pub ai: AiConfig,
}

/// Flat mirror of the environment variables the process reads.
///
/// The `config` crate lowercases environment keys, so `TELEGRAM_TOKEN`
/// arrives as `telegram_token`. Required values are optional here and
/// checked in [`AppConfig::load`] so a missing secret surfaces as a named
/// startup error rather than a generic deserialization failure.
#[derive(Debug, Deserialize)]
struct EnvSettings {
    telegram_token: Option<String>,
    gemini_api_key: Option<String>,
    port: Option<u16>,
    host: Option<String>,
    gemini_model: Option<String>,
    provider_timeout_secs: Option<u64>,
    log_level: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads the flat environment variables listed in [`EnvSettings`]
    /// 3. Assembles typed configuration sections
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required secret (`TELEGRAM_TOKEN`,
    /// `GEMINI_API_KEY`) is absent or a value cannot be parsed into its
    /// expected type. Either case is fatal: the process must not start.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let env: EnvSettings = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?
            .try_deserialize()?;

        let telegram_token = env
            .telegram_token
            .filter(|t| !t.is_empty())
            .ok_or(ValidationError::MissingRequired("TELEGRAM_TOKEN"))?;
        let gemini_api_key = env
            .gemini_api_key
            .filter(|k| !k.is_empty())
            .ok_or(ValidationError::MissingRequired("GEMINI_API_KEY"))?;

        let mut server = ServerConfig::default();
        if let Some(host) = env.host {
            server.host = host;
        }
        if let Some(port) = env.port {
            server.port = port;
        }
        if let Some(log_level) = env.log_level {
            server.log_level = log_level;
        }

        let mut ai = AiConfig::new(Secret::new(gemini_api_key));
        if let Some(model) = env.gemini_model {
            ai.model = model;
        }
        if let Some(timeout) = env.provider_timeout_secs {
            ai.timeout_secs = timeout;
        }

        Ok(Self {
            server,
            telegram: TelegramConfig::new(Secret::new(telegram_token)),
            ai,
        })
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.telegram.validate()?;
        self.ai.validate()?;
        Ok(())
    }
}
