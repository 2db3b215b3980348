//! Session - the single chat connection and its dispatch loop.
//!
//! ```text
//! Bootstrapping: PASS, NICK, JOIN
//!    ↓
//! Listening ──line──▶ Matching ──rule──▶ Responding ──line──▶ write + flush
//!    ▲                    │ no rule                               │
//!    └────────────────────┴───────────────────────────────────────┘
//! ```
//!
//! Lines are handled strictly one at a time in arrival order. A slow
//! response (e.g. a stalled status request) holds up every later line.

mod dispatch;
mod event_loop;
mod handshake;

pub use dispatch::{Dispatch, dispatch_line};

use super::codec::LineCodec;
use crate::config::SessionConfig;
use crate::error::TransportError;
use crate::handlers::Registry;
use crate::telemetry::WIRE_TARGET;
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::debug;

/// One connection to the chat server.
pub struct Session<R, W> {
    reader: FramedRead<R, LineCodec>,
    writer: FramedWrite<W, LineCodec>,
    config: Arc<SessionConfig>,
    registry: Arc<Registry>,
    /// Suppress the wire trace and unhandled-line log.
    quiet: bool,
}

impl<R, W> Session<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Create a session over an already-connected transport.
    pub fn new(reader: R, writer: W, config: Arc<SessionConfig>, registry: Arc<Registry>) -> Self {
        Self {
            reader: FramedRead::new(reader, LineCodec::default()),
            writer: FramedWrite::new(writer, LineCodec::default()),
            config,
            registry,
            quiet: true,
        }
    }

    /// Enable or suppress the wire trace.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Read the next line, waiting as long as it takes.
    async fn recv(&mut self) -> Result<String, TransportError> {
        match self.reader.next().await {
            Some(Ok(line)) => {
                if !self.quiet {
                    debug!(target: WIRE_TARGET, "> {}", line.trim_end());
                }
                Ok(line)
            }
            Some(Err(e)) => Err(TransportError::Read(e)),
            None => Err(TransportError::Closed),
        }
    }

    /// Write one complete line and flush it.
    async fn send(&mut self, line: String, quiet: bool) -> Result<(), TransportError> {
        if !quiet {
            debug!(target: WIRE_TARGET, "< {}", line.trim_end());
        }
        self.writer.send(line).await.map_err(TransportError::Write)
    }
}
