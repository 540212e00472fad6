//! Process entry: start the liveness thread, then enter the blocking
//! receive loop against the chat platform.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chat_courier::adapters::ai::GeminiProvider;
use chat_courier::adapters::http::liveness;
use chat_courier::adapters::store::InMemoryConversationStore;
use chat_courier::adapters::telegram::{TelegramClient, UpdatePoller};
use chat_courier::application::MessageRelay;
use chat_courier::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing secret fails here, before anything starts.
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    tracing::info!(model = %config.ai.model, "loaded configuration");

    liveness::spawn(config.server.socket_addr())?;

    let telegram = Arc::new(TelegramClient::new(config.telegram.clone()));
    let me = telegram.get_me().await?;
    tracing::info!(
        bot = %me.first_name,
        username = me.username.as_deref().unwrap_or("-"),
        "connected to Telegram"
    );

    let relay = Arc::new(MessageRelay::new(
        Arc::new(InMemoryConversationStore::new()),
        Arc::new(GeminiProvider::new(config.ai.clone())),
        telegram.clone(),
    ));

    UpdatePoller::new(telegram, relay).run().await;
    Ok(())
}
