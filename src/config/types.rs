//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A secret string that is zeroized when dropped and never printed.
///
/// Used for the chat credential token and the status API client ID.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    /// Wrap a secret value.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Borrow the secret for the one place it is actually needed.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("\"***\"")
    }
}

/// Bot configuration as read from disk.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Nickname the bot identifies as.
    pub username: String,
    /// Channel to join, without the leading `#`.
    pub channel: String,
    /// Credential sent in the `PASS` line.
    pub oauth_token: Secret,
    /// Client identifier for the status API.
    pub client_id: Secret,
    /// Chat server endpoint.
    #[serde(default)]
    pub server: ServerConfig,
    /// Stream status API settings.
    #[serde(default)]
    pub status: StatusConfig,
    /// Chat command prefixes.
    #[serde(default)]
    pub commands: CommandsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// The immutable record handed to response producers.
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            username: self.username.clone(),
            channel: self.channel.clone(),
            oauth_token: self.oauth_token.clone(),
            client_id: self.client_id.clone(),
        }
    }
}

/// Identity, target and credentials for one connection.
///
/// Read-only for the whole session. `Debug` output redacts both secrets.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub username: String,
    pub channel: String,
    pub oauth_token: Secret,
    pub client_id: Secret,
}

/// Chat server endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Hostname, also used for TLS server name verification.
    #[serde(default = "default_host")]
    pub host: String,
    /// TLS port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "irc.chat.twitch.tv".to_string()
}

fn default_port() -> u16 {
    6697
}

/// Stream status API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusConfig {
    /// Streams endpoint; the channel is passed as `user_login`.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Upper bound on one status request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.twitch.tv/helix/streams".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Chat command prefixes.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandsConfig {
    /// Message prefixes that trigger the uptime reply.
    #[serde(default = "default_uptime_prefixes")]
    pub uptime: Vec<String>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            uptime: default_uptime_prefixes(),
        }
    }
}

fn default_uptime_prefixes() -> Vec<String> {
    vec!["!uptime".to_string()]
}
