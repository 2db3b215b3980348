//! Per-line dispatch with error containment.
//!
//! Any failure while building or resolving a response, including a panic,
//! is logged in full and replaced by a short fallback message to the
//! configured channel. Nothing a handler does can end the session.

use crate::config::SessionConfig;
use crate::error::{HandlerError, error_chain};
use crate::handlers::Registry;
use crate::protocol;
use crate::telemetry::spans;
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tracing::{Instrument, error};

/// Outcome of dispatching one incoming line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// No rule matched.
    Unhandled,
    /// Rule `rule` matched; `reply` is the line to send, if any.
    Handled { rule: usize, reply: Option<String> },
}

/// Run `line` through the rule table and resolve the winning rule's response.
pub async fn dispatch_line(registry: &Registry, config: &SessionConfig, line: &str) -> Dispatch {
    let Some((rule_index, rule, line_match)) = registry.lookup(line) else {
        return Dispatch::Unhandled;
    };

    let outcome = match std::panic::catch_unwind(AssertUnwindSafe(|| rule.build(&line_match))) {
        Ok(response) => AssertUnwindSafe(response.resolve(config))
            .catch_unwind()
            .instrument(spans::dispatch(rule_index))
            .await
            .unwrap_or_else(|payload| Err(panic_error(payload))),
        Err(payload) => Err(panic_error(payload)),
    };

    let reply = match outcome {
        Ok(reply) => reply,
        Err(e) => {
            error!(
                rule = rule_index,
                kind = e.kind(),
                error = %error_chain(&e),
                line = %line.trim_end(),
                "Handler failed"
            );
            Some(fallback(config, &e))
        }
    };

    Dispatch::Handled {
        rule: rule_index,
        reply,
    }
}

/// `*** unhandled <kind> -- see logs`, addressed to the configured channel.
fn fallback(config: &SessionConfig, e: &HandlerError) -> String {
    protocol::privmsg(
        &config.channel,
        &format!("*** unhandled {} -- see logs", e.kind()),
    )
}

fn panic_error(payload: Box<dyn Any + Send>) -> HandlerError {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string());
    HandlerError::Panic(message)
}
