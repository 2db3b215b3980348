//! Uptime command handler.
//!
//! The factory does no I/O; the status lookup happens when the deferred
//! [`UptimeResponse`] is resolved by the dispatch loop.

use super::super::{LineMatch, Producer, Response};
use crate::config::SessionConfig;
use crate::error::HandlerResult;
use crate::protocol;
use crate::status::StatusSource;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Largest unit first.
const UNITS: [(u64, &str); 3] = [(60 * 60, "hours"), (60, "minutes"), (1, "seconds")];

/// Deferred reply reporting how long the configured channel has been live.
pub struct UptimeResponse {
    source: Arc<dyn StatusSource>,
}

impl UptimeResponse {
    pub fn new(source: Arc<dyn StatusSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Producer for UptimeResponse {
    async fn produce(&self, config: &SessionConfig) -> HandlerResult<Option<String>> {
        let started_at = self
            .source
            .live_since(&config.channel, config.client_id.expose())
            .await?;

        let msg = match started_at {
            None => "not currently streaming!".to_string(),
            Some(started_at) => format!(
                "streaming for: {}",
                format_uptime(elapsed_seconds(started_at, Utc::now()))
            ),
        };
        Ok(Some(protocol::privmsg(&config.channel, &msg)))
    }
}

/// Factory for the uptime rule, bound to a status source.
pub fn cmd_uptime(
    source: Arc<dyn StatusSource>,
) -> impl Fn(&LineMatch) -> Response + Send + Sync + 'static {
    move |_| Response::deferred(UptimeResponse::new(Arc::clone(&source)))
}

/// Whole seconds from `started_at` to `now`, clamped at zero.
///
/// Uses the full datetime difference, so streams longer than a day keep
/// counting hours past 24.
pub fn elapsed_seconds(started_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    u64::try_from((now - started_at).num_seconds()).unwrap_or(0)
}

/// `1 hours, 1 minutes, 1 seconds`; zero-valued units are left out.
pub fn format_uptime(mut elapsed: u64) -> String {
    if elapsed == 0 {
        return "0 seconds".to_string();
    }

    let mut parts = Vec::with_capacity(UNITS.len());
    for (size, unit) in UNITS {
        let count = elapsed / size;
        if count > 0 {
            parts.push(format!("{count} {unit}"));
        }
        elapsed %= size;
    }
    parts.join(", ")
}
