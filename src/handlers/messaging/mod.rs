//! Chat message handlers.
//!
//! Handles chat commands addressed to the channel:
//! - `PING ...`: echoes the rest of the message back as `PONG ...`
//! - uptime prefixes (default `!uptime`): reports how long the stream has been live

mod ping;
mod uptime;

pub use ping::msg_ping;
pub use uptime::{UptimeResponse, cmd_uptime, elapsed_seconds, format_uptime};
