//! Ordered conversation history.

use serde::{Deserialize, Serialize};

use super::{ConversationTurn, TurnRole};

/// The ordered sequence of turns constituting a conversation's context.
///
/// Append-only during normal operation: turns are pushed in chronological
/// order and never reordered or deduplicated. Each history is owned by
/// exactly one user identity's session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHistory {
    turns: Vec<ConversationTurn>,
}

impl ConversationHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn at the end.
    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// Appends a user turn followed by the assistant's reply.
    pub fn push_exchange(&mut self, user_text: impl Into<String>, reply_text: impl Into<String>) {
        self.push(ConversationTurn::user(user_text));
        self.push(ConversationTurn::assistant(reply_text));
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True if the history holds no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The turns in chronological order.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// The most recent turn, if any.
    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    /// Iterates over turns in chronological order.
    pub fn iter(&self) -> std::slice::Iter<'_, ConversationTurn> {
        self.turns.iter()
    }

    /// True when turns strictly alternate user/assistant starting with user.
    ///
    /// Every successful exchange appends one user turn and one assistant
    /// turn, so a history of only successful exchanges satisfies this.
    pub fn alternates(&self) -> bool {
        self.turns.iter().enumerate().all(|(i, turn)| {
            let expected = if i % 2 == 0 {
                TurnRole::User
            } else {
                TurnRole::Assistant
            };
            turn.role == expected
        })
    }
}

impl FromIterator<ConversationTurn> for ConversationHistory {
    fn from_iter<I: IntoIterator<Item = ConversationTurn>>(iter: I) -> Self {
        Self {
            turns: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ConversationHistory {
    type Item = &'a ConversationTurn;
    type IntoIter = std::slice::Iter<'a, ConversationTurn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_history_is_empty() {
        let history = ConversationHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert!(history.last().is_none());
    }

    #[test]
    fn push_preserves_order() {
        let mut history = ConversationHistory::new();
        history.push(ConversationTurn::user("first"));
        history.push(ConversationTurn::assistant("second"));
        history.push(ConversationTurn::user("third"));

        let texts: Vec<_> = history.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn push_exchange_appends_user_then_assistant() {
        let mut history = ConversationHistory::new();
        history.push_exchange("hello", "hi there");

        assert_eq!(history.len(), 2);
        assert_eq!(history.turns()[0], ConversationTurn::user("hello"));
        assert_eq!(history.turns()[1], ConversationTurn::assistant("hi there"));
    }

    #[test]
    fn n_exchanges_yield_2n_turns() {
        let mut history = ConversationHistory::new();
        for i in 0..5 {
            history.push_exchange(format!("question {i}"), format!("answer {i}"));
        }
        assert_eq!(history.len(), 10);
        assert!(history.alternates());
    }

    #[test]
    fn alternates_rejects_out_of_order_roles() {
        let mut history = ConversationHistory::new();
        history.push(ConversationTurn::assistant("unprompted"));
        assert!(!history.alternates());
    }

    #[test]
    fn serializes_as_bare_turn_list() {
        let mut history = ConversationHistory::new();
        history.push_exchange("hello", "hi there");

        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"role": "user", "text": "hello"},
                {"role": "assistant", "text": "hi there"}
            ])
        );
    }
}
