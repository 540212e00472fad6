//! Chat Platform Port - outbound operations on the originating chat.
//!
//! The relay only ever calls two operations on the platform: sending reply
//! text and signalling a presence indicator while a provider call is in
//! flight. Inbound message delivery is the platform adapter's own loop and
//! is not part of this port.

use async_trait::async_trait;

use crate::domain::ChatId;

/// Presence indicator shown on a conversation channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The bot is composing a reply.
    Typing,
}

/// Port for outbound chat-platform operations.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Sends a text message to the chat.
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), PlatformError>;

    /// Signals a presence indicator on the chat.
    async fn send_presence(&self, chat: ChatId, presence: Presence) -> Result<(), PlatformError>;
}

/// Chat platform errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    /// The platform API rejected the call.
    #[error("platform API error: {description}")]
    Api {
        /// Description returned by the platform.
        description: String,
    },

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the platform response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl PlatformError {
    /// Creates an API error from the platform's description.
    pub fn api(description: impl Into<String>) -> Self {
        Self::Api {
            description: description.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
