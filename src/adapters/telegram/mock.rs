//! Mock chat platform for testing.
//!
//! Records every outbound call so tests can verify what the relay sent and
//! in what order, and can inject send failures.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::ChatId;
use crate::ports::{ChatPlatform, PlatformError, Presence};

/// One recorded outbound operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentItem {
    /// A text message.
    Text { chat: ChatId, text: String },
    /// A presence indicator.
    Presence { chat: ChatId, presence: Presence },
}

/// Recording mock implementation of the ChatPlatform port.
#[derive(Debug, Clone, Default)]
pub struct MockChatPlatform {
    sent: Arc<Mutex<Vec<SentItem>>>,
    fail_sends: Arc<Mutex<bool>>,
}

impl MockChatPlatform {
    /// Creates a new mock platform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent `send_text` calls fail.
    pub fn fail_sends(&self, fail: bool) {
        *self.fail_sends.lock().unwrap() = fail;
    }

    /// Everything sent so far, in order.
    pub fn sent(&self) -> Vec<SentItem> {
        self.sent.lock().unwrap().clone()
    }

    /// Text messages sent to the given chat, in order.
    pub fn texts_to(&self, chat: ChatId) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter_map(|item| match item {
                SentItem::Text { chat: c, text } if *c == chat => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of presence signals sent to the given chat.
    pub fn presence_count(&self, chat: ChatId) -> usize {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|item| matches!(item, SentItem::Presence { chat: c, .. } if *c == chat))
            .count()
    }
}

#[async_trait]
impl ChatPlatform for MockChatPlatform {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), PlatformError> {
        if *self.fail_sends.lock().unwrap() {
            return Err(PlatformError::network("mock send failure"));
        }
        self.sent.lock().unwrap().push(SentItem::Text {
            chat,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_presence(&self, chat: ChatId, presence: Presence) -> Result<(), PlatformError> {
        self.sent
            .lock()
            .unwrap()
            .push(SentItem::Presence { chat, presence });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_sends_in_order() {
        let platform = MockChatPlatform::new();
        let chat = ChatId::new(1);

        platform.send_presence(chat, Presence::Typing).await.unwrap();
        platform.send_text(chat, "hello").await.unwrap();

        assert_eq!(platform.presence_count(chat), 1);
        assert_eq!(platform.texts_to(chat), vec!["hello"]);
        assert!(matches!(platform.sent()[0], SentItem::Presence { .. }));
    }

    #[tokio::test]
    async fn injected_failures_surface() {
        let platform = MockChatPlatform::new();
        platform.fail_sends(true);

        let result = platform.send_text(ChatId::new(1), "hello").await;
        assert!(matches!(result, Err(PlatformError::Network(_))));
    }
}
