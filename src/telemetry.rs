//! Logging utilities: tracing targets, the chat event log, and spans.
//!
//! Two diagnostic streams exist:
//! - the wire trace (`uptimebot::wire`, debug): every raw line in and out,
//!   suppressed for quiet sessions;
//! - the chat log (`uptimebot::chat`, info): `[HH:MM]<nick> body` for every
//!   chat message received or sent.
//!
//! Neither stream ever carries the credential line.

use chrono::{DateTime, Local};
use tracing::info;

/// Target for the raw wire trace.
pub const WIRE_TARGET: &str = "uptimebot::wire";

/// Target for the chat event log.
pub const CHAT_TARGET: &str = "uptimebot::chat";

/// Render one chat log entry.
pub fn chat_entry(at: DateTime<Local>, nick: &str, body: &str) -> String {
    format!("{}<{}> {}", at.format("[%H:%M]"), nick, body)
}

/// Emit a chat log entry stamped with the current local time.
pub fn log_chat(nick: &str, body: &str) {
    info!(target: CHAT_TARGET, "{}", chat_entry(Local::now(), nick, body));
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Span, info_span};

    /// Span for the lifetime of a chat session.
    pub fn session(nick: &str, channel: &str) -> Span {
        info_span!("session", nick = %nick, channel = %channel)
    }

    /// Span for resolving the response of one matched rule.
    pub fn dispatch(rule: usize) -> Span {
        info_span!("dispatch", rule = rule)
    }
}
