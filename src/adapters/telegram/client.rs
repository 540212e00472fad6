//! Telegram Bot API client.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

use super::types::{ApiResponse, Update, User};
use crate::config::TelegramConfig;
use crate::domain::ChatId;
use crate::ports::{ChatPlatform, PlatformError, Presence};

/// HTTP client for the Telegram Bot API.
///
/// Implements the outbound ChatPlatform port and the inbound polling calls.
pub struct TelegramClient {
    config: TelegramConfig,
    client: Client,
}

impl TelegramClient {
    /// Creates a new client with the given configuration.
    ///
    /// The HTTP timeout must exceed the long-poll timeout, otherwise every
    /// idle `getUpdates` call would be cut short by our own client.
    pub fn new(config: TelegramConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.poll_timeout_secs + 10))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Long-poll timeout this client passes to `getUpdates`.
    pub fn poll_timeout_secs(&self) -> u64 {
        self.config.poll_timeout_secs
    }

    /// Builds the URL for a Bot API method.
    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.base_url,
            self.config.bot_token(),
            method
        )
    }

    /// Calls a Bot API method and unwraps the response envelope.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        body: serde_json::Value,
    ) -> Result<T, PlatformError> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(&body)
            .send()
            .await
            .map_err(|e| PlatformError::network(e.to_string()))?;

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| PlatformError::parse(e.to_string()))?;

        if !envelope.ok {
            return Err(PlatformError::api(
                envelope
                    .description
                    .unwrap_or_else(|| "unknown platform error".to_string()),
            ));
        }

        envelope
            .result
            .ok_or_else(|| PlatformError::parse("ok response without result"))
    }

    /// Identifies the bot account (startup sanity check).
    pub async fn get_me(&self) -> Result<User, PlatformError> {
        self.call("getMe", json!({})).await
    }

    /// Fetches inbound updates, long-polling up to the configured timeout.
    ///
    /// `offset` must be one past the last processed `update_id` so Telegram
    /// drops everything already handled.
    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, PlatformError> {
        let mut body = json!({
            "timeout": self.config.poll_timeout_secs,
            "allowed_updates": ["message"],
        });
        if let Some(offset) = offset {
            body["offset"] = json!(offset);
        }

        self.call("getUpdates", body).await
    }
}

#[async_trait]
impl ChatPlatform for TelegramClient {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), PlatformError> {
        let _: super::types::Message = self
            .call(
                "sendMessage",
                json!({ "chat_id": chat.as_i64(), "text": text }),
            )
            .await?;
        Ok(())
    }

    async fn send_presence(&self, chat: ChatId, presence: Presence) -> Result<(), PlatformError> {
        let action = match presence {
            Presence::Typing => "typing",
        };
        let _: bool = self
            .call(
                "sendChatAction",
                json!({ "chat_id": chat.as_i64(), "action": action }),
            )
            .await?;
        Ok(())
    }
}
