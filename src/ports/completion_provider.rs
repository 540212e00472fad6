//! Completion Provider Port - interface to the external LLM service.
//!
//! The provider is treated as an opaque remote call: full history plus the
//! new message in, reply text plus the canonical updated history out.
//! Failure is an explicit result, not a caught exception, so the relay's
//! contract makes error handling visible.

use async_trait::async_trait;

use crate::domain::conversation::ConversationHistory;

/// Port for LLM completion providers.
///
/// Implementations make exactly one attempt per call; retry policy is the
/// caller's concern (and the relay deliberately has none).
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Requests a single completion for `message` in the context of
    /// `history`.
    async fn complete(
        &self,
        history: &ConversationHistory,
        message: &str,
    ) -> Result<Completion, ProviderError>;
}

/// A successful completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// The model's reply text.
    pub reply_text: String,
    /// The canonical history after this exchange: the input history with the
    /// user turn and the assistant turn appended, in that order.
    pub updated_history: ConversationHistory,
}

impl Completion {
    /// Builds a completion from the pre-call history and the exchange texts.
    pub fn from_exchange(
        mut history: ConversationHistory,
        user_text: impl Into<String>,
        reply_text: impl Into<String>,
    ) -> Self {
        let reply_text = reply_text.into();
        history.push_exchange(user_text, reply_text.clone());
        Self {
            reply_text,
            updated_history: history,
        }
    }
}

/// Completion provider errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Rate limited or quota exhausted.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// The provider rejected the request as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The provider is unavailable (server-side failure).
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured client timeout.
        timeout_secs: u32,
    },

    /// Failed to parse the provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The response carried no usable reply text.
    #[error("provider returned an empty reply")]
    EmptyReply,
}

impl ProviderError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}
