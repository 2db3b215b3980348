//! Keep-alive handler.

use super::super::{LineMatch, Response};

/// Pattern for the server's liveness probe: `PING <payload>`.
pub const PING_PATTERN: &str = r"^PING (.*)";

/// Answer `PING <payload>` with `PONG <payload>`, echoing the payload exactly.
pub fn pong(m: &LineMatch) -> Response {
    // PING <payload>
    let payload = m.get(1).unwrap_or("");
    Response::command(format!("PONG {payload}\r\n"))
}
