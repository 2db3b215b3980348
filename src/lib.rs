//! uptimebot - single-channel chat bot
//!
//! Connects to one chat channel over TLS, answers server keep-alives, and
//! replies to chat commands through an ordered table of pattern rules.

pub mod config;
pub mod error;
pub mod handlers;
pub mod network;
pub mod protocol;
pub mod status;
pub mod telemetry;
