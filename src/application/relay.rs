//! Message Relay - the conversation-state lifecycle.
//!
//! Receives an inbound user message, retrieves that user's history, makes a
//! single completion call carrying the full history plus the new message,
//! stores the provider's canonical updated history, and sends the reply.
//!
//! Every per-message failure is absorbed here: a failed provider call is
//! logged with the user identity, the user receives a fixed apology, and
//! the stored history is left exactly as it was (the failed turn is
//! dropped, not retried, not queued). Nothing escapes a handler.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::{ChatId, UserId};
use crate::ports::{
    ChatPlatform, CompletionProvider, ConversationStore, Presence, ProviderError,
};

/// Fixed user-facing reply when a provider call fails.
pub const APOLOGY_TEXT: &str =
    "Sorry, something went wrong while generating a reply. Please try again later.";

/// Fixed confirmation after the history is cleared.
pub const CLEARED_TEXT: &str = "Conversation history cleared. We can start fresh!";

/// Welcome message for the greet command.
pub fn welcome_text(display_name: &str) -> String {
    format!(
        "Hello, {display_name}!\n\n\
         I'm your personal AI assistant. Ask me anything. \
         Send /clear to wipe the conversation history."
    )
}

/// Errors internal to a relay operation.
///
/// These never propagate past the relay: `handle_message` converts them to
/// the apology reply. The type exists so the failure modes are explicit in
/// the contract rather than hidden behind a broad catch.
#[derive(Debug, Clone, Error)]
pub enum RelayError {
    /// The completion provider failed.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The inbound message carried no usable text.
    #[error("message text is empty")]
    EmptyMessage,
}

/// The message relay.
///
/// Owns its collaborators through ports, so the store, provider, and
/// platform are all injectable and mockable.
pub struct MessageRelay {
    store: Arc<dyn ConversationStore>,
    provider: Arc<dyn CompletionProvider>,
    platform: Arc<dyn ChatPlatform>,
}

impl MessageRelay {
    /// Creates a relay over the given collaborators.
    pub fn new(
        store: Arc<dyn ConversationStore>,
        provider: Arc<dyn CompletionProvider>,
        platform: Arc<dyn ChatPlatform>,
    ) -> Self {
        Self {
            store,
            provider,
            platform,
        }
    }

    /// Handles one inbound text message.
    ///
    /// Signals a typing indicator while the provider call is in flight,
    /// makes exactly one attempt, and updates the store only on success.
    /// Returns the text that was sent back to the chat.
    pub async fn handle_message(&self, user: UserId, chat: ChatId, text: &str) -> String {
        // Presence is best-effort: a failed indicator must not stop the
        // exchange.
        if let Err(e) = self.platform.send_presence(chat, Presence::Typing).await {
            tracing::warn!(user_id = %user, error = %e, "failed to send typing indicator");
        }

        let reply = match self.relay(user, text).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(user_id = %user, error = %e, "error handling message");
                APOLOGY_TEXT.to_string()
            }
        };

        self.send(user, chat, &reply).await;
        reply
    }

    /// The relay core: fetch history, one provider attempt, store update.
    ///
    /// On failure the store is left untouched.
    async fn relay(&self, user: UserId, text: &str) -> Result<String, RelayError> {
        if text.trim().is_empty() {
            return Err(RelayError::EmptyMessage);
        }

        let history = self.store.get_or_create(user).await;
        tracing::debug!(user_id = %user, history_len = history.len(), "relaying message");

        let completion = self.provider.complete(&history, text).await?;

        self.store.update(user, completion.updated_history).await;
        Ok(completion.reply_text)
    }

    /// Handles the greet command: resets history and welcomes the user by
    /// display name. Idempotent.
    pub async fn greet(&self, user: UserId, chat: ChatId, display_name: &str) -> String {
        self.store.reset(user).await;
        tracing::info!(user_id = %user, "conversation started");

        let reply = welcome_text(display_name);
        self.send(user, chat, &reply).await;
        reply
    }

    /// Handles the clear command: resets history and confirms. Idempotent,
    /// identical to greet apart from the reply text.
    pub async fn clear(&self, user: UserId, chat: ChatId) -> String {
        self.store.reset(user).await;
        tracing::info!(user_id = %user, "conversation history cleared");

        self.send(user, chat, CLEARED_TEXT).await;
        CLEARED_TEXT.to_string()
    }

    /// Sends a reply, logging (not propagating) platform failures.
    async fn send(&self, user: UserId, chat: ChatId, text: &str) {
        if let Err(e) = self.platform.send_text(chat, text).await {
            tracing::error!(user_id = %user, error = %e, "failed to send reply");
        }
    }
}
