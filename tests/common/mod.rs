//! Integration test common infrastructure.
//!
//! Provides an in-memory chat server that a bot session connects to, and
//! helpers for building the session it talks to.

pub mod server;

#[allow(unused_imports)]
pub use server::{FakeServer, session_config, spawn_bot};
