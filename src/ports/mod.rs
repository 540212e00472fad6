//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! relay and the outside world. Adapters implement these ports.
//!
//! - `ConversationStore` - per-user conversation history, keyed by identity
//! - `CompletionProvider` - the external LLM completion service
//! - `ChatPlatform` - outbound operations on the chat platform

mod chat_platform;
mod completion_provider;
mod conversation_store;

pub use chat_platform::{ChatPlatform, PlatformError, Presence};
pub use completion_provider::{Completion, CompletionProvider, ProviderError};
pub use conversation_store::ConversationStore;
