//! Unified error handling for uptimebot.
//!
//! Two families of errors exist:
//! - [`TransportError`]: the connection is unusable. Fatal, propagated out of
//!   the session loop.
//! - [`HandlerError`]: a rule's response could not be produced. Contained at
//!   the dispatch boundary and reported to the channel as a fallback message.

use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Transport Errors (connection lifetime)
// ============================================================================

/// Errors from the encrypted line transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to connect to {addr}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid server name: {0}")]
    InvalidServerName(String),

    #[error("TLS setup failed")]
    Tls(#[source] std::io::Error),

    #[error("read error")]
    Read(#[source] std::io::Error),

    #[error("write error")]
    Write(#[source] std::io::Error),

    #[error("connection closed by server")]
    Closed,
}

// ============================================================================
// Handler Errors (response production)
// ============================================================================

/// Errors raised while turning a matched line into a response.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("status request failed")]
    Http(#[from] reqwest::Error),

    #[error("status service returned HTTP {0}")]
    Status(u16),

    #[error("malformed status response")]
    Json(#[from] serde_json::Error),

    #[error("status response is missing `{0}`")]
    MissingField(&'static str),

    #[error("invalid stream start time")]
    Timestamp(#[from] chrono::ParseError),

    #[error("status request timed out after {0:?}")]
    Timeout(Duration),

    #[error("template error")]
    Template(#[from] TemplateError),

    #[error("handler panicked: {0}")]
    Panic(String),
}

impl HandlerError {
    /// Stable name of the error kind, shown to the channel in the
    /// `*** unhandled <kind> -- see logs` fallback.
    #[inline]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http(_) => "HttpError",
            Self::Status(_) => "StatusError",
            Self::Json(_) => "JsonError",
            Self::MissingField(_) => "KeyError",
            Self::Timestamp(_) => "TimestampError",
            Self::Timeout(_) => "TimeoutError",
            Self::Template(_) => "TemplateError",
            Self::Panic(_) => "Panic",
        }
    }
}

/// Result type for response producers.
pub type HandlerResult<T> = Result<T, HandlerError>;

// ============================================================================
// Template Errors (message formatting)
// ============================================================================

/// Message template rendering errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("unbalanced brace at offset {0}")]
    UnbalancedBrace(usize),
}

/// Render an error with its full `source()` chain, outermost first.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
