//! HTTP adapters.

pub mod liveness;
