//! In-Memory Conversation Store Adapter
//!
//! Process-wide mapping from user identity to conversation history. State
//! lives only as long as the process: no persistence, no eviction, no size
//! bound. Memory grows with distinct users times conversation length.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conversation::ConversationHistory;
use crate::domain::UserId;
use crate::ports::ConversationStore;

/// In-memory storage for per-user conversation history.
///
/// Cloning is cheap and clones share the same underlying map. Concurrent
/// access for different users never interferes; concurrent writes for the
/// same user resolve last-writer-wins.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationStore {
    histories: Arc<RwLock<HashMap<UserId, ConversationHistory>>>,
}

impl InMemoryConversationStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with a stored history (useful for tests)
    pub async fn user_count(&self) -> usize {
        self.histories.read().await.len()
    }

    /// Clear all stored histories (useful for tests)
    pub async fn clear(&self) {
        self.histories.write().await.clear();
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn get_or_create(&self, user: UserId) -> ConversationHistory {
        // Fast path: existing history under a read lock.
        if let Some(history) = self.histories.read().await.get(&user) {
            return history.clone();
        }

        let mut histories = self.histories.write().await;
        histories.entry(user).or_default().clone()
    }

    async fn reset(&self, user: UserId) {
        let mut histories = self.histories.write().await;
        histories.insert(user, ConversationHistory::new());
    }

    async fn update(&self, user: UserId, history: ConversationHistory) {
        let mut histories = self.histories.write().await;
        histories.insert(user, history);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::ConversationTurn;

    fn history_of(n_exchanges: usize) -> ConversationHistory {
        let mut history = ConversationHistory::new();
        for i in 0..n_exchanges {
            history.push_exchange(format!("q{i}"), format!("a{i}"));
        }
        history
    }

    #[tokio::test]
    async fn test_unseen_user_gets_empty_history() {
        let store = InMemoryConversationStore::new();
        let history = store.get_or_create(UserId::new(1)).await;
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_update_then_get_returns_stored_history() {
        let store = InMemoryConversationStore::new();
        let user = UserId::new(42);

        store.update(user, history_of(2)).await;

        let loaded = store.get_or_create(user).await;
        assert_eq!(loaded.len(), 4);
        assert_eq!(loaded, history_of(2));
    }

    #[tokio::test]
    async fn test_reset_empties_history() {
        let store = InMemoryConversationStore::new();
        let user = UserId::new(42);

        store.update(user, history_of(3)).await;
        store.reset(user).await;

        assert!(store.get_or_create(user).await.is_empty());
    }

    #[tokio::test]
    async fn test_reset_is_idempotent() {
        let store = InMemoryConversationStore::new();
        let user = UserId::new(7);

        store.reset(user).await;
        store.reset(user).await;

        assert!(store.get_or_create(user).await.is_empty());
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_update_replaces_wholesale() {
        let store = InMemoryConversationStore::new();
        let user = UserId::new(42);

        store.update(user, history_of(5)).await;

        let replacement: ConversationHistory =
            [ConversationTurn::user("only")].into_iter().collect();
        store.update(user, replacement.clone()).await;

        assert_eq!(store.get_or_create(user).await, replacement);
    }

    #[tokio::test]
    async fn test_users_do_not_interfere() {
        let store = InMemoryConversationStore::new();
        let alice = UserId::new(1);
        let bob = UserId::new(2);

        store.update(alice, history_of(1)).await;
        store.update(bob, history_of(4)).await;
        store.reset(alice).await;

        assert!(store.get_or_create(alice).await.is_empty());
        assert_eq!(store.get_or_create(bob).await.len(), 8);
    }

    #[tokio::test]
    async fn test_concurrent_access_different_users() {
        let store = InMemoryConversationStore::new();

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let user = UserId::new(i);
                store.get_or_create(user).await;
                store.update(user, history_of(1)).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.user_count().await, 16);
        for i in 0..16 {
            assert_eq!(store.get_or_create(UserId::new(i)).await.len(), 2);
        }
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let store = InMemoryConversationStore::new();
        store.update(UserId::new(1), history_of(1)).await;
        store.update(UserId::new(2), history_of(1)).await;

        store.clear().await;

        assert_eq!(store.user_count().await, 0);
    }
}
