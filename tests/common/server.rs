//! In-memory chat server.
//!
//! The bot side of a `tokio::io::duplex` pipe runs a real [`Session`]; the
//! test holds the other side and reads and writes raw protocol lines.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{
    AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, ReadHalf, WriteHalf,
};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use uptimebot::config::{Secret, SessionConfig};
use uptimebot::error::TransportError;
use uptimebot::handlers::Registry;
use uptimebot::network::Session;

/// Handle to the bot task.
pub type BotHandle = JoinHandle<Result<Infallible, TransportError>>;

/// Session configuration used by every test.
pub fn session_config() -> SessionConfig {
    SessionConfig {
        username: "uptimebot".to_string(),
        channel: "home".to_string(),
        oauth_token: Secret::new("oauth:hunter2"),
        client_id: Secret::new("test-client"),
    }
}

/// Start a bot session over an in-memory pipe.
///
/// The bot bootstraps and then serves lines until the pipe closes.
pub fn spawn_bot(registry: Registry) -> (FakeServer, BotHandle) {
    let (bot_side, server_side) = tokio::io::duplex(8192);
    let (bot_reader, bot_writer) = tokio::io::split(bot_side);

    let mut session = Session::new(
        bot_reader,
        bot_writer,
        Arc::new(session_config()),
        Arc::new(registry),
    )
    .quiet(false);

    let handle = tokio::spawn(async move {
        session.bootstrap().await?;
        session.run().await
    });

    (FakeServer::new(server_side), handle)
}

/// The server end of the pipe.
pub struct FakeServer {
    reader: BufReader<ReadHalf<DuplexStream>>,
    writer: WriteHalf<DuplexStream>,
}

impl FakeServer {
    fn new(stream: DuplexStream) -> Self {
        let (read_half, write_half) = tokio::io::split(stream);
        Self {
            reader: BufReader::new(read_half),
            writer: write_half,
        }
    }

    /// Send a raw line to the bot, adding `\r\n` if missing.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with("\r\n") {
            self.writer.write_all(b"\r\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Send raw bytes to the bot, exactly as given.
    pub async fn send_bytes(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.writer.write_all(bytes).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive one line from the bot, terminator included.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive one line with a timeout.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("bot closed the connection");
        }
        Ok(line)
    }

    /// Receive the three bootstrap lines.
    pub async fn recv_bootstrap(&mut self) -> anyhow::Result<Vec<String>> {
        let mut lines = Vec::with_capacity(3);
        for _ in 0..3 {
            lines.push(self.recv().await?);
        }
        Ok(lines)
    }

    /// True if the bot writes nothing within `dur`.
    pub async fn is_silent_for(&mut self, dur: Duration) -> bool {
        self.recv_timeout(dur).await.is_err()
    }

    /// Hang up on the bot.
    pub async fn close(mut self) -> anyhow::Result<()> {
        self.writer.shutdown().await?;
        Ok(())
    }
}
