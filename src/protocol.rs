//! Line shapes of the chat protocol.
//!
//! Builders for the lines the bot sends and recognizers for the chat lines it
//! logs. Every builder returns a complete line including the `\r\n` terminator.

use regex::Regex;
use std::sync::LazyLock;

/// Protocol line terminator.
pub const CRLF: &str = "\r\n";

/// Incoming chat message: `:<sender>!... PRIVMSG #<channel> :<body>`.
static INCOMING_CHAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^:([^!]+).* PRIVMSG #[^ ]+ :([^\r]+)").expect("incoming chat pattern is valid")
});

/// Outgoing chat message: `PRIVMSG #<channel> :<body>`.
static OUTGOING_CHAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PRIVMSG #[^ ]+ :(?P<msg>[^\r]+)").expect("outgoing chat pattern is valid")
});

/// A chat message seen on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLine<'a> {
    pub sender: &'a str,
    pub body: &'a str,
}

/// Recognize a chat message sent by another user.
pub fn parse_incoming(line: &str) -> Option<ChatLine<'_>> {
    let caps = INCOMING_CHAT.captures(line)?;
    Some(ChatLine {
        sender: caps.get(1)?.as_str(),
        body: caps.get(2)?.as_str(),
    })
}

/// Recognize a chat message the bot is about to send; yields the body.
pub fn parse_outgoing(line: &str) -> Option<&str> {
    OUTGOING_CHAT
        .captures(line)
        .and_then(|caps| caps.name("msg"))
        .map(|m| m.as_str())
}

/// Full rule pattern for a chat message whose body starts with `prefix`.
///
/// Captures `user`, `channel` and `msg`. The `msg` capture holds the whole
/// body, prefix included, so handlers can see the rest of the message.
pub fn chat_pattern(prefix: &str) -> String {
    format!(
        "^:(?P<user>[^!]+).* PRIVMSG #(?P<channel>[^ ]+) :(?P<msg>{}.*)",
        regex::escape(prefix)
    )
}

/// `PRIVMSG #<channel> :<msg>\r\n`.
///
/// CR and LF inside `msg` are dropped so the result is always one line.
pub fn privmsg(channel: &str, msg: &str) -> String {
    let msg: String = msg.chars().filter(|c| *c != '\r' && *c != '\n').collect();
    format!("PRIVMSG #{channel} :{msg}{CRLF}")
}

/// `PASS <token>\r\n`. Never trace this line.
pub fn pass(token: &str) -> String {
    format!("PASS {token}{CRLF}")
}

/// `NICK <nick>\r\n`.
pub fn nick(nick: &str) -> String {
    format!("NICK {nick}{CRLF}")
}

/// `JOIN #<channel>\r\n`.
pub fn join(channel: &str) -> String {
    format!("JOIN #{channel}{CRLF}")
}
