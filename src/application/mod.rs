//! Application layer - the relay's use cases.

mod relay;

pub use relay::{welcome_text, MessageRelay, RelayError, APOLOGY_TEXT, CLEARED_TEXT};
