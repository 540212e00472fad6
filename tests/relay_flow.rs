//! Integration tests for the message relay flow.
//!
//! Exercises the conversation-state lifecycle end to end over the real
//! in-memory store with mock provider and platform:
//! 1. Histories start empty and grow by one exchange per success
//! 2. Greet and clear reset state idempotently
//! 3. A failed provider call changes nothing and yields the fixed apology
//! 4. Users are isolated from one another

use std::sync::Arc;

use chat_courier::adapters::ai::MockCompletionProvider;
use chat_courier::adapters::store::InMemoryConversationStore;
use chat_courier::adapters::telegram::{MockChatPlatform, SentItem};
use chat_courier::application::{welcome_text, MessageRelay, APOLOGY_TEXT, CLEARED_TEXT};
use chat_courier::domain::conversation::{ConversationTurn, TurnRole};
use chat_courier::domain::{ChatId, UserId};
use chat_courier::ports::{ConversationStore, Presence, ProviderError};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestBot {
    relay: MessageRelay,
    store: Arc<InMemoryConversationStore>,
    provider: MockCompletionProvider,
    platform: MockChatPlatform,
}

impl TestBot {
    fn new() -> Self {
        let store = Arc::new(InMemoryConversationStore::new());
        let provider = MockCompletionProvider::new();
        let platform = MockChatPlatform::new();
        let relay = MessageRelay::new(
            store.clone(),
            Arc::new(provider.clone()),
            Arc::new(platform.clone()),
        );
        Self {
            relay,
            store,
            provider,
            platform,
        }
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn unseen_user_has_empty_history() {
    let bot = TestBot::new();

    let history = bot.store.get_or_create(UserId::new(999)).await;

    assert!(history.is_empty());
}

#[tokio::test]
async fn hello_exchange_stores_both_turns_and_replies() {
    let bot = TestBot::new();
    let user = UserId::new(42);
    let chat = ChatId::new(42);
    bot.provider.push_reply("hi there");

    let reply = bot.relay.handle_message(user, chat, "hello").await;

    assert_eq!(reply, "hi there");

    let history = bot.store.get_or_create(user).await;
    assert_eq!(history.len(), 2);
    assert_eq!(history.turns()[0], ConversationTurn::user("hello"));
    assert_eq!(
        history.last().unwrap(),
        &ConversationTurn::assistant("hi there")
    );
    assert_eq!(bot.platform.texts_to(chat), vec!["hi there"]);
}

#[tokio::test]
async fn history_grows_two_turns_per_successful_exchange() {
    let bot = TestBot::new();
    let user = UserId::new(42);
    let chat = ChatId::new(42);

    for i in 0..4 {
        bot.provider.push_reply(format!("answer {i}"));
        bot.relay
            .handle_message(user, chat, &format!("question {i}"))
            .await;
    }

    let history = bot.store.get_or_create(user).await;
    assert_eq!(history.len(), 8);
    assert!(history.alternates());

    // Strict chronological order.
    let texts: Vec<_> = history.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts[0], "question 0");
    assert_eq!(texts[7], "answer 3");
}

#[tokio::test]
async fn clear_command_resets_history_and_confirms() {
    let bot = TestBot::new();
    let user = UserId::new(42);
    let chat = ChatId::new(42);
    bot.provider.push_reply("hi there");
    bot.relay.handle_message(user, chat, "hello").await;

    let reply = bot.relay.clear(user, chat).await;

    assert_eq!(reply, CLEARED_TEXT);
    assert!(bot.store.get_or_create(user).await.is_empty());
}

#[tokio::test]
async fn greet_and_clear_are_idempotent() {
    let bot = TestBot::new();
    let user = UserId::new(42);
    let chat = ChatId::new(42);
    bot.relay.handle_message(user, chat, "hello").await;

    bot.relay.greet(user, chat, "Ada").await;
    bot.relay.greet(user, chat, "Ada").await;
    assert!(bot.store.get_or_create(user).await.is_empty());

    bot.relay.handle_message(user, chat, "hello again").await;
    bot.relay.clear(user, chat).await;
    bot.relay.clear(user, chat).await;
    assert!(bot.store.get_or_create(user).await.is_empty());
}

#[tokio::test]
async fn greet_mentions_display_name() {
    let bot = TestBot::new();

    let reply = bot.relay.greet(UserId::new(42), ChatId::new(42), "Ada").await;

    assert_eq!(reply, welcome_text("Ada"));
    assert!(reply.contains("Ada"));
}

#[tokio::test]
async fn failing_provider_leaves_history_unchanged() {
    let bot = TestBot::new();
    let user = UserId::new(7);
    let chat = ChatId::new(7);

    bot.provider.push_reply("earlier answer");
    bot.relay.handle_message(user, chat, "earlier question").await;
    let before = bot.store.get_or_create(user).await;

    bot.provider
        .push_error(ProviderError::RateLimited("quota exceeded".to_string()));
    let reply = bot.relay.handle_message(user, chat, "doomed question").await;

    assert_eq!(reply, APOLOGY_TEXT);
    assert_eq!(bot.store.get_or_create(user).await, before);
    assert_eq!(before.len(), 2);
}

#[tokio::test]
async fn failure_on_first_message_keeps_history_empty() {
    let bot = TestBot::new();
    let user = UserId::new(7);
    let chat = ChatId::new(7);
    bot.provider
        .push_error(ProviderError::network("connection refused"));

    let reply = bot.relay.handle_message(user, chat, "hello").await;

    assert_eq!(reply, APOLOGY_TEXT);
    assert!(bot.store.get_or_create(user).await.is_empty());
    assert_eq!(bot.platform.texts_to(chat), vec![APOLOGY_TEXT.to_string()]);
}

#[tokio::test]
async fn typing_indicator_sent_before_each_reply() {
    let bot = TestBot::new();
    let user = UserId::new(42);
    let chat = ChatId::new(42);

    bot.relay.handle_message(user, chat, "hello").await;
    bot.relay.handle_message(user, chat, "again").await;

    assert_eq!(bot.platform.presence_count(chat), 2);
    let sent = bot.platform.sent();
    assert_eq!(
        sent[0],
        SentItem::Presence {
            chat,
            presence: Presence::Typing
        }
    );
}

#[tokio::test]
async fn users_have_independent_histories() {
    let bot = TestBot::new();
    let alice = UserId::new(1);
    let bob = UserId::new(2);

    bot.provider.push_reply("for alice");
    bot.relay
        .handle_message(alice, ChatId::new(1), "from alice")
        .await;
    bot.provider.push_reply("for bob");
    bot.relay
        .handle_message(bob, ChatId::new(2), "from bob")
        .await;
    bot.relay.clear(alice, ChatId::new(1)).await;

    assert!(bot.store.get_or_create(alice).await.is_empty());

    let bob_history = bot.store.get_or_create(bob).await;
    assert_eq!(bob_history.len(), 2);
    assert_eq!(bob_history.turns()[0].text, "from bob");
}

#[tokio::test]
async fn concurrent_messages_from_different_users_all_land() {
    let bot = TestBot::new();
    let relay = Arc::new(bot.relay);

    let mut handles = Vec::new();
    for i in 0..8 {
        let relay = relay.clone();
        handles.push(tokio::spawn(async move {
            relay
                .handle_message(UserId::new(i), ChatId::new(i), &format!("message {i}"))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(bot.store.user_count().await, 8);
    for i in 0..8 {
        let history = bot.store.get_or_create(UserId::new(i)).await;
        assert_eq!(history.len(), 2);
        assert_eq!(history.turns()[0].role, TurnRole::User);
    }
}
