//! Mock Completion Provider for testing.
//!
//! Configurable implementation of the CompletionProvider port so tests run
//! without calling the real API: pre-queued replies, error injection, and
//! call recording for verification.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockCompletionProvider::new()
//!     .with_reply("hi there")
//!     .with_error(ProviderError::unavailable("down"));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::conversation::ConversationHistory;
use crate::ports::{Completion, CompletionProvider, ProviderError};

/// A queued mock outcome.
#[derive(Debug, Clone)]
enum MockOutcome {
    Reply(String),
    Error(ProviderError),
}

/// One recorded `complete` call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// History passed to the provider, as seen before the call.
    pub history: ConversationHistory,
    /// The new message text.
    pub message: String,
}

/// Mock completion provider.
///
/// Outcomes are consumed in FIFO order; once the queue is empty every call
/// succeeds with a fixed placeholder reply.
#[derive(Debug, Clone, Default)]
pub struct MockCompletionProvider {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockCompletionProvider {
    /// Creates a new mock provider with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Reply(reply.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: ProviderError) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Error(error));
        self
    }

    /// Queues a reply without consuming self (for mid-test setup).
    pub fn push_reply(&self, reply: impl Into<String>) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Reply(reply.into()));
    }

    /// Queues an error without consuming self.
    pub fn push_error(&self, error: ProviderError) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Error(error));
    }

    /// Number of `complete` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(
        &self,
        history: &ConversationHistory,
        message: &str,
    ) -> Result<Completion, ProviderError> {
        self.calls.lock().unwrap().push(RecordedCall {
            history: history.clone(),
            message: message.to_string(),
        });

        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockOutcome::Reply("(mock reply)".to_string()));

        match outcome {
            MockOutcome::Reply(reply) => {
                Ok(Completion::from_exchange(history.clone(), message, reply))
            }
            MockOutcome::Error(error) => Err(error),
        }
    }
}
