//! Line-based codec for tokio.
//!
//! Reads `\n`-terminated lines and keeps the terminator, so patterns can
//! insist on the full `\r\n`. Decoding is lossy: invalid UTF-8 becomes
//! `U+FFFD` instead of failing the connection.

use bytes::BytesMut;
use std::io;
use tokio_util::codec::{Decoder, Encoder};
use tracing::warn;

/// Default maximum line length in bytes, terminator included.
pub const DEFAULT_MAX_LINE: usize = 4096;

/// Line codec that tolerates bad bytes and oversized lines.
///
/// Lines longer than `max_len` are dropped up to their terminator and
/// decoding carries on with the next line.
#[derive(Debug)]
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length
    max_len: usize,
    /// Skipping the rest of an oversized line
    discarding: bool,
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::with_max_len(DEFAULT_MAX_LINE)
    }
}

impl LineCodec {
    /// Create a codec with a custom max line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: false,
        }
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> io::Result<Option<String>> {
        loop {
            // Look for newline starting from where we left off
            let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') else {
                if src.len() > self.max_len {
                    warn!(len = src.len(), limit = self.max_len, "Discarding oversized line");
                    src.clear();
                    self.discarding = true;
                }
                // No complete line yet - remember where we stopped
                self.next_index = src.len();
                return Ok(None);
            };

            let line = src.split_to(self.next_index + offset + 1);
            self.next_index = 0;

            if self.discarding {
                self.discarding = false;
                continue;
            }
            if line.len() > self.max_len {
                warn!(len = line.len(), limit = self.max_len, "Discarding oversized line");
                continue;
            }

            return Ok(Some(String::from_utf8_lossy(&line).into_owned()));
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> io::Result<Option<String>> {
        // An unterminated trailing fragment is not a protocol line.
        let line = self.decode(src)?;
        if line.is_none() {
            src.clear();
            self.next_index = 0;
        }
        Ok(line)
    }
}

impl Encoder<String> for LineCodec {
    type Error = io::Error;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> io::Result<()> {
        dst.extend_from_slice(line.as_bytes());
        Ok(())
    }
}
