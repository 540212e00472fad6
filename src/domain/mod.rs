//! Domain types for the relay.

pub mod conversation;
mod ids;

pub use ids::{ChatId, UserId};
