//! Chat line handlers.
//!
//! This module contains the rule table and the built-in handler factories,
//! plus [`default_registry`] which wires them in their fixed order.
//!
//! ## Rule Order
//!
//! 1. Server keep-alive `PING <payload>` → `PONG <payload>`
//! 2. Uptime prefixes from `[commands]` → stream status reply
//! 3. Chat `PING ...` → `PONG ...`
//!
//! First match wins, so a chat message matching an uptime prefix never
//! reaches the chat PING rule.

mod connection;
mod core;
mod messaging;

pub use self::core::{
    HandlerFactory, LineMatch, Producer, Registry, Response, Rule, escape, render,
};
pub use connection::{PING_PATTERN, pong};
pub use messaging::{UptimeResponse, cmd_uptime, elapsed_seconds, format_uptime, msg_ping};

use crate::config::Config;
use crate::status::StatusSource;
use std::sync::Arc;

/// Build the rule table used by the bot.
pub fn default_registry(
    config: &Config,
    status: Arc<dyn StatusSource>,
) -> Result<Registry, regex::Error> {
    let mut registry = Registry::new();
    registry
        .register(PING_PATTERN, pong)?
        .register_message(&config.commands.uptime, cmd_uptime(status))?
        .register_message(["PING"], msg_ping)?;
    Ok(registry)
}
