//! Network module.
//!
//! Contains the line codec, the TLS connector, and the chat Session.

pub mod codec;
mod connection;
mod tls;

pub use codec::LineCodec;
pub use connection::{Dispatch, Session, dispatch_line};
pub use tls::{TlsStream, connect, upgrade_to_tls};
