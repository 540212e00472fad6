//! Completion provider adapters.

mod gemini_provider;
mod mock_provider;

pub use gemini_provider::GeminiProvider;
pub use mock_provider::{MockCompletionProvider, RecordedCall};
