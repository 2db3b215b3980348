//! Stream status lookups.
//!
//! The uptime command asks an external HTTP service whether the channel is
//! live and since when. [`StatusSource`] is the seam; [`HelixStatus`] is the
//! HTTP implementation.

use crate::config::StatusConfig;
use crate::error::{HandlerError, HandlerResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Source of "is this channel live, and since when".
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Start time of the channel's current stream, or `None` when offline.
    async fn live_since(
        &self,
        channel: &str,
        client_id: &str,
    ) -> HandlerResult<Option<DateTime<Utc>>>;
}

/// Status lookups against a Helix-style `streams` endpoint.
pub struct HelixStatus {
    /// HTTP client for API calls.
    http_client: reqwest::Client,
    /// Streams endpoint URL.
    api_url: String,
    /// Upper bound on one request.
    timeout: Duration,
}

impl HelixStatus {
    /// Create a status client from configuration.
    pub fn new(config: &StatusConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("uptimebot/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Falling back to default HTTP client");
                reqwest::Client::new()
            });

        Self {
            http_client,
            api_url: config.api_url.clone(),
            timeout,
        }
    }

    async fn fetch(&self, channel: &str, client_id: &str) -> HandlerResult<String> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[("user_login", channel)])
            .header("Client-ID", client_id)
            .send()
            .await
            .map_err(|e| self.http_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HandlerError::Status(status.as_u16()));
        }
        response.text().await.map_err(|e| self.http_error(e))
    }

    /// The client's own deadline and the outer one report the same kind.
    fn http_error(&self, e: reqwest::Error) -> HandlerError {
        if e.is_timeout() {
            HandlerError::Timeout(self.timeout)
        } else {
            HandlerError::Http(e)
        }
    }
}

#[async_trait]
impl StatusSource for HelixStatus {
    async fn live_since(
        &self,
        channel: &str,
        client_id: &str,
    ) -> HandlerResult<Option<DateTime<Utc>>> {
        let body = tokio::time::timeout(self.timeout, self.fetch(channel, client_id))
            .await
            .map_err(|_| HandlerError::Timeout(self.timeout))??;

        let started_at = parse_streams(&body)?;
        debug!(channel = %channel, live = started_at.is_some(), "Stream status fetched");
        Ok(started_at)
    }
}

/// Page of stream records as returned by the status service.
#[derive(Debug, Deserialize)]
struct StreamsPage {
    data: Option<Vec<StreamRecord>>,
}

#[derive(Debug, Deserialize)]
struct StreamRecord {
    started_at: Option<String>,
}

/// Extract the first stream's start time from a status response body.
///
/// An empty `data` list means the channel is offline.
pub fn parse_streams(body: &str) -> HandlerResult<Option<DateTime<Utc>>> {
    let page: StreamsPage = serde_json::from_str(body)?;
    let records = page.data.ok_or(HandlerError::MissingField("data"))?;

    let Some(first) = records.into_iter().next() else {
        return Ok(None);
    };
    let started_at = first
        .started_at
        .ok_or(HandlerError::MissingField("started_at"))?;
    Ok(Some(started_at.parse::<DateTime<Utc>>()?))
}
