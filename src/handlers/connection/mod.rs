//! Connection-level handlers.
//!
//! Handles the server's keep-alive PING.

mod ping;

pub use ping::{PING_PATTERN, pong};
