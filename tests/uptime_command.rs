//! Integration tests for the uptime command against a mocked status service.

mod common;

use chrono::{Duration as ChronoDuration, Utc};
use common::spawn_bot;
use std::sync::Arc;
use uptimebot::config::{Config, StatusConfig};
use uptimebot::handlers::default_registry;
use uptimebot::status::{HelixStatus, StatusSource};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ASK_UPTIME: &str = ":alice!alice@alice.tmi.twitch.tv PRIVMSG #home :!uptime please";

fn bot_config() -> Config {
    Config::from_toml_str(
        r#"
        username = "uptimebot"
        channel = "home"
        oauth_token = "oauth:hunter2"
        client_id = "test-client"
        "#,
    )
    .unwrap()
}

fn status_for(server: &MockServer, timeout_secs: u64) -> Arc<HelixStatus> {
    Arc::new(HelixStatus::new(&StatusConfig {
        api_url: format!("{}/helix/streams", server.uri()),
        timeout_secs,
    }))
}

async fn mock_streams(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/helix/streams"))
        .and(query_param("user_login", "home"))
        .and(header("Client-ID", "test-client"))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_uptime_when_offline() -> anyhow::Result<()> {
    let api = MockServer::start().await;
    mock_streams(
        &api,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })),
    )
    .await;

    let registry = default_registry(&bot_config(), status_for(&api, 5))?;
    let (mut chat, _bot) = spawn_bot(registry);
    chat.recv_bootstrap().await?;

    chat.send_raw(ASK_UPTIME).await?;
    assert_eq!(
        chat.recv().await?,
        "PRIVMSG #home :not currently streaming!\r\n"
    );
    Ok(())
}

#[tokio::test]
async fn test_uptime_when_live() -> anyhow::Result<()> {
    let api = MockServer::start().await;
    let started_at = Utc::now() - ChronoDuration::hours(2);
    mock_streams(
        &api,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{
                "user_login": "home",
                "type": "live",
                "started_at": started_at.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            }]
        })),
    )
    .await;

    let registry = default_registry(&bot_config(), status_for(&api, 5))?;
    let (mut chat, _bot) = spawn_bot(registry);
    chat.recv_bootstrap().await?;

    chat.send_raw(ASK_UPTIME).await?;
    let reply = chat.recv().await?;
    assert!(
        reply.starts_with("PRIVMSG #home :streaming for: 2 hours"),
        "unexpected reply: {reply:?}"
    );
    assert!(reply.ends_with("\r\n"));
    Ok(())
}

#[tokio::test]
async fn test_uptime_service_error_is_reported() -> anyhow::Result<()> {
    let api = MockServer::start().await;
    mock_streams(&api, ResponseTemplate::new(500)).await;

    let registry = default_registry(&bot_config(), status_for(&api, 5))?;
    let (mut chat, _bot) = spawn_bot(registry);
    chat.recv_bootstrap().await?;

    chat.send_raw(ASK_UPTIME).await?;
    assert_eq!(
        chat.recv().await?,
        "PRIVMSG #home :*** unhandled StatusError -- see logs\r\n"
    );

    chat.send_raw("PING :tmi.twitch.tv").await?;
    assert_eq!(chat.recv().await?, "PONG :tmi.twitch.tv\r\n");
    Ok(())
}

#[tokio::test]
async fn test_uptime_missing_data_is_reported() -> anyhow::Result<()> {
    let api = MockServer::start().await;
    mock_streams(
        &api,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "error": "nope" })),
    )
    .await;

    let registry = default_registry(&bot_config(), status_for(&api, 5))?;
    let (mut chat, _bot) = spawn_bot(registry);
    chat.recv_bootstrap().await?;

    chat.send_raw(ASK_UPTIME).await?;
    assert_eq!(
        chat.recv().await?,
        "PRIVMSG #home :*** unhandled KeyError -- see logs\r\n"
    );
    Ok(())
}

#[tokio::test]
async fn test_uptime_request_timeout_is_reported() -> anyhow::Result<()> {
    let api = MockServer::start().await;
    mock_streams(
        &api,
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({ "data": [] }))
            .set_delay(std::time::Duration::from_secs(3)),
    )
    .await;

    let registry = default_registry(&bot_config(), status_for(&api, 1))?;
    let (mut chat, _bot) = spawn_bot(registry);
    chat.recv_bootstrap().await?;

    chat.send_raw(ASK_UPTIME).await?;
    assert_eq!(
        chat.recv().await?,
        "PRIVMSG #home :*** unhandled TimeoutError -- see logs\r\n"
    );
    Ok(())
}

#[tokio::test]
async fn test_slow_status_service_is_always_a_timeout() -> anyhow::Result<()> {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/helix/streams"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "data": [] }))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&api)
        .await;

    let status = status_for(&api, 1);
    for _ in 0..3 {
        let err = status.live_since("home", "test-client").await.unwrap_err();
        assert_eq!(err.kind(), "TimeoutError", "unexpected error: {err}");
    }
    Ok(())
}
