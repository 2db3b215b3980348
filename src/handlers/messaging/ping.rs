//! Chat-level PING handler.

use super::super::{LineMatch, Response, escape};

/// Reply to a chat message `PING <rest>` with `PONG <rest>` in the same channel.
///
/// `<rest>` is chat text, so its braces are escaped before it becomes part
/// of the reply template.
pub fn msg_ping(m: &LineMatch) -> Response {
    let body = m.name("msg").unwrap_or("");
    let rest = body.split_once(' ').map_or("", |(_, rest)| rest);
    Response::message(m, format!("PONG {}", escape(rest)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Secret, SessionConfig};
    use crate::handlers::Registry;

    fn session() -> SessionConfig {
        SessionConfig {
            username: "uptimebot".to_string(),
            channel: "home".to_string(),
            oauth_token: Secret::new("oauth:secret"),
            client_id: Secret::new("client"),
        }
    }

    async fn reply(line: &str) -> Option<String> {
        let mut registry = Registry::new();
        registry.register_message(["PING"], msg_ping).unwrap();
        let (_, rule, m) = registry.lookup(line)?;
        rule.build(&m).resolve(&session()).await.unwrap()
    }

    #[tokio::test]
    async fn echoes_rest_to_same_channel() {
        let out = reply(":alice!alice@x PRIVMSG #chan :PING hello\r\n").await;
        assert_eq!(out.as_deref(), Some("PRIVMSG #chan :PONG hello\r\n"));
    }

    #[tokio::test]
    async fn braces_in_chat_render_literally() {
        let out = reply(":mallory!m@x PRIVMSG #chan :PING {evil} {user}\r\n").await;
        assert_eq!(out.as_deref(), Some("PRIVMSG #chan :PONG {evil} {user}\r\n"));
    }

    #[tokio::test]
    async fn bare_ping_replies_with_empty_rest() {
        let out = reply(":alice!alice@x PRIVMSG #chan :PING\r\n").await;
        assert_eq!(out.as_deref(), Some("PRIVMSG #chan :PONG \r\n"));
    }

    #[tokio::test]
    async fn only_first_word_is_dropped() {
        let out = reply(":alice!alice@x PRIVMSG #chan :PING a b  c\r\n").await;
        assert_eq!(out.as_deref(), Some("PRIVMSG #chan :PONG a b  c\r\n"));
    }
}
