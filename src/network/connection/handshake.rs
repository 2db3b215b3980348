//! Session bootstrap: credential, identity, join.

use super::Session;
use crate::error::TransportError;
use crate::protocol;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::info;

impl<R, W> Session<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Send `PASS`, `NICK` and `JOIN`, in that order.
    ///
    /// The `PASS` line carries the credential and is never traced.
    pub async fn bootstrap(&mut self) -> Result<(), TransportError> {
        let pass = protocol::pass(self.config.oauth_token.expose());
        self.send(pass, true).await?;

        let nick = protocol::nick(&self.config.username);
        self.send(nick, self.quiet).await?;

        let join = protocol::join(&self.config.channel);
        self.send(join, self.quiet).await?;

        info!(
            nick = %self.config.username,
            channel = %self.config.channel,
            "Bootstrap lines sent"
        );
        Ok(())
    }
}
