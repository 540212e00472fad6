//! Identifier newtypes.
//!
//! Telegram assigns numeric identifiers to both users and chats. Wrapping
//! them keeps the two from being swapped at call sites.

use serde::{Deserialize, Serialize};

/// Platform-assigned identity of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates a UserId from the platform's numeric identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw numeric identifier.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Platform-assigned identity of a chat (the channel replies go to).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(i64);

impl ChatId {
    /// Creates a ChatId from the platform's numeric identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw numeric identifier.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_round_trips() {
        let id = UserId::new(42);
        assert_eq!(id.as_i64(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&ChatId::new(-100123)).unwrap();
        assert_eq!(json, "-100123");

        let back: ChatId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ChatId::new(-100123));
    }
}
