//! Telegram Bot API adapter.
//!
//! Raw Bot API over HTTP: the client implements the outbound ChatPlatform
//! port (`sendMessage`, `sendChatAction`) and exposes the inbound calls
//! (`getUpdates`, `getMe`) the poller drives.

mod client;
mod mock;
mod poller;
pub mod types;

pub use client::TelegramClient;
pub use mock::{MockChatPlatform, SentItem};
pub use poller::UpdatePoller;
