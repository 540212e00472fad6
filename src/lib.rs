//! Chat Courier - Conversational relay bot.
//!
//! Receives text messages from Telegram, forwards them to a hosted LLM
//! completion provider together with the sender's conversation history, and
//! relays the reply back. A minimal HTTP endpoint answers the hosting
//! platform's liveness probe.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
