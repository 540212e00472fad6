//! Adapters - implementations of the ports.

pub mod ai;
pub mod http;
pub mod store;
pub mod telegram;
