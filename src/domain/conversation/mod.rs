//! Conversation model: turns and per-user history.

mod history;
mod turn;

pub use history::ConversationHistory;
pub use turn::{ConversationTurn, TurnRole};
