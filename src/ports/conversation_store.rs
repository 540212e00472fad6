//! Conversation Store Port - per-user history keyed by platform identity.
//!
//! The store is an explicit, injectable abstraction owned by the relay
//! rather than hidden framework state, so it can be mocked and tested in
//! isolation.
//!
//! # Re-entrancy contract
//!
//! Implementations must tolerate concurrent calls for *different* keys
//! without interference. Concurrent calls for the *same* key (a rapid
//! double-send from one user) have no defined ordering guarantee; the last
//! `update` wins.

use async_trait::async_trait;

use crate::domain::conversation::ConversationHistory;
use crate::domain::UserId;

/// Port for the process-wide mapping from user identity to history.
///
/// All operations are infallible: an unknown user simply has an empty
/// history, and writes cannot be rejected.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Returns the existing history for the user, or an empty one if none
    /// exists yet.
    async fn get_or_create(&self, user: UserId) -> ConversationHistory;

    /// Replaces the user's history with an empty sequence. Idempotent.
    async fn reset(&self, user: UserId);

    /// Replaces the stored history wholesale with `history` (the
    /// provider-returned canonical history).
    async fn update(&self, user: UserId, history: ConversationHistory);
}
