//! Completion provider configuration

use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use super::error::ValidationError;

/// Gemini completion provider configuration
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Gemini API key (`GEMINI_API_KEY` env var)
    api_key: Secret<String>,

    /// Model to request (`GEMINI_MODEL` env var)
    pub model: String,

    /// Base URL for the API
    pub base_url: String,

    /// HTTP client timeout in seconds (`PROVIDER_TIMEOUT_SECS` env var).
    /// The relay itself enforces no timeout; this is the client's own.
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Creates a configuration with the given API key and defaults.
    pub fn new(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }

    /// Sets the model to request.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Exposes the API key (for making requests).
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate provider configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key().is_empty() {
            return Err(ValidationError::EmptyApiKey);
        }
        if self.model.is_empty() {
            return Err(ValidationError::EmptyModel);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_timeout() -> u64 {
    60
}
