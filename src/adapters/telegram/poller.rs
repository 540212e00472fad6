//! Long-poll update dispatcher.
//!
//! Fetches updates from Telegram, tracks the acknowledgement offset, and
//! dispatches each update on its own task so one user's in-flight provider
//! call never blocks another user's message. The loop itself survives
//! transient poll failures with a short pause.

use std::sync::Arc;
use std::time::Duration;

use super::client::TelegramClient;
use super::types::Update;
use crate::application::MessageRelay;

/// Pause before retrying after a failed `getUpdates` call.
const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// What an inbound text resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Inbound {
    /// The greet command (`/start`).
    Start,
    /// The clear command (`/clear`).
    Clear,
    /// A plain message for the relay.
    Text,
    /// Unsupported input (unknown command, blank text).
    Ignore,
}

/// Routes a message text to greet, clear, relay, or nothing.
///
/// Commands may carry a bot-name suffix (`/clear@SomeBot`) in group chats.
/// Unknown commands are ignored rather than relayed, matching the
/// command-vs-text split of the inbound handlers.
fn classify(text: &str) -> Inbound {
    let trimmed = text.trim();
    if let Some(rest) = trimmed.strip_prefix('/') {
        let command = rest.split_whitespace().next().unwrap_or("");
        return match command.split('@').next().unwrap_or("") {
            "start" => Inbound::Start,
            "clear" => Inbound::Clear,
            _ => Inbound::Ignore,
        };
    }
    if trimmed.is_empty() {
        Inbound::Ignore
    } else {
        Inbound::Text
    }
}

/// The inbound dispatch loop.
pub struct UpdatePoller {
    client: Arc<TelegramClient>,
    relay: Arc<MessageRelay>,
}

impl UpdatePoller {
    /// Creates a poller over the given client and relay.
    pub fn new(client: Arc<TelegramClient>, relay: Arc<MessageRelay>) -> Self {
        Self { client, relay }
    }

    /// Runs the blocking receive loop. Does not return.
    pub async fn run(self) {
        let mut offset: Option<i64> = None;
        tracing::info!(
            poll_timeout_secs = self.client.poll_timeout_secs(),
            "update poller started"
        );

        loop {
            match self.client.get_updates(offset).await {
                Ok(updates) => {
                    for update in updates {
                        // Acknowledge before dispatch: a handler failure must
                        // not make Telegram redeliver the update.
                        offset = Some(update.update_id + 1);

                        let relay = Arc::clone(&self.relay);
                        tokio::spawn(async move {
                            handle_update(relay, update).await;
                        });
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to fetch updates, backing off");
                    tokio::time::sleep(POLL_ERROR_BACKOFF).await;
                }
            }
        }
    }
}

/// Handles one update: extracts sender, chat, and text, then routes.
async fn handle_update(relay: Arc<MessageRelay>, update: Update) {
    let Some(message) = update.message else {
        return;
    };
    let Some(from) = message.from else {
        return;
    };
    let Some(text) = message.text.as_deref() else {
        tracing::debug!(update_id = update.update_id, "ignoring non-text message");
        return;
    };

    let user = from.id;
    let chat = message.chat.id;

    match classify(text) {
        Inbound::Start => {
            relay.greet(user, chat, &from.first_name).await;
        }
        Inbound::Clear => {
            relay.clear(user, chat).await;
        }
        Inbound::Text => {
            relay.handle_message(user, chat, text).await;
        }
        Inbound::Ignore => {
            tracing::debug!(user_id = %user, "ignoring unsupported input");
        }
    }
}
