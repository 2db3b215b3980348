//! Responses and response producers.
//!
//! Dispatch is two-phase. A handler factory runs synchronously on the match
//! and returns a [`Response`]; the dispatch loop then resolves that response
//! against the session config, which is where any I/O happens.
//!
//! ```text
//! line ──▶ Rule ──factory──▶ Response ──resolve(config).await──▶ Option<line>
//! ```

use super::registry::LineMatch;
use super::template;
use crate::config::SessionConfig;
use crate::error::{HandlerResult, TemplateError};
use crate::protocol;
use async_trait::async_trait;
use std::collections::HashMap;

/// Deferred, possibly I/O-performing computation of an outbound line.
#[async_trait]
pub trait Producer: Send + Sync {
    /// Produce the outbound line, or `None` to send nothing.
    async fn produce(&self, config: &SessionConfig) -> HandlerResult<Option<String>>;
}

/// The outcome of a handler factory.
pub enum Response {
    /// Send nothing.
    Nothing,
    /// Send this exact protocol line.
    Command(String),
    /// Render a chat reply from the match's named captures.
    ///
    /// The reply goes to the captured `channel`.
    Message {
        params: HashMap<String, String>,
        template: String,
    },
    /// Defer to a producer at resolve time.
    Deferred(Box<dyn Producer>),
}

impl Response {
    /// A literal protocol line. Must already carry its `\r\n`.
    pub fn command(line: impl Into<String>) -> Self {
        Self::Command(line.into())
    }

    /// A chat reply rendered from `m`'s named captures.
    pub fn message(m: &LineMatch, template: impl Into<String>) -> Self {
        Self::Message {
            params: m.named().clone(),
            template: template.into(),
        }
    }

    /// A reply computed later by `producer`.
    pub fn deferred(producer: impl Producer + 'static) -> Self {
        Self::Deferred(Box::new(producer))
    }

    /// Resolve to the outbound line, if any.
    pub async fn resolve(self, config: &SessionConfig) -> HandlerResult<Option<String>> {
        match self {
            Self::Nothing => Ok(None),
            Self::Command(line) => Ok(Some(line)),
            Self::Message { mut params, template } => {
                let msg = template::render(&template, &params)?;
                let channel = params
                    .remove("channel")
                    .ok_or_else(|| TemplateError::UnknownField("channel".to_string()))?;
                Ok(Some(protocol::privmsg(&channel, &msg)))
            }
            Self::Deferred(producer) => producer.produce(config).await,
        }
    }
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nothing => f.write_str("Nothing"),
            Self::Command(line) => f.debug_tuple("Command").field(line).finish(),
            Self::Message { params, template } => f
                .debug_struct("Message")
                .field("params", params)
                .field("template", template)
                .finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}
