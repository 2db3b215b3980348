//! The read-dispatch-write loop.

use super::Session;
use super::dispatch::{Dispatch, dispatch_line};
use crate::error::TransportError;
use crate::protocol;
use crate::telemetry::{WIRE_TARGET, log_chat, spans};
use std::convert::Infallible;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{Instrument, info};

impl<R, W> Session<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Process exactly one incoming line.
    ///
    /// Returns the line written in reply, if any. Only transport failures
    /// are returned as errors; handler failures have already been turned
    /// into a fallback reply.
    pub async fn step(&mut self) -> Result<Option<String>, TransportError> {
        let line = self.recv().await?;

        if let Some(chat) = protocol::parse_incoming(&line) {
            log_chat(chat.sender, chat.body);
        }

        match dispatch_line(&self.registry, &self.config, &line).await {
            Dispatch::Unhandled => {
                if !self.quiet {
                    info!(target: WIRE_TARGET, "UNHANDLED: {}", line.trim_end());
                }
                Ok(None)
            }
            Dispatch::Handled { reply: None, .. } => Ok(None),
            Dispatch::Handled {
                reply: Some(reply), ..
            } => {
                if let Some(body) = protocol::parse_outgoing(&reply) {
                    log_chat(&self.config.username, body);
                }
                self.send(reply.clone(), self.quiet).await?;
                Ok(Some(reply))
            }
        }
    }

    /// Serve lines until the transport fails or the server hangs up.
    ///
    /// Never returns successfully.
    pub async fn run(mut self) -> Result<Infallible, TransportError> {
        let span = spans::session(&self.config.username, &self.config.channel);
        self.serve().instrument(span).await
    }

    async fn serve(&mut self) -> Result<Infallible, TransportError> {
        loop {
            self.step().await?;
        }
    }
}
