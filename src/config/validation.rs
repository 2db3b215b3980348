//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("username is required")]
    MissingUsername,
    #[error("channel is required")]
    MissingChannel,
    #[error("channel must be given without the leading '#', got '{0}'")]
    ChannelHasHash(String),
    #[error("channel must not contain whitespace, got '{0}'")]
    ChannelHasWhitespace(String),
    #[error("oauth_token is required")]
    MissingOauthToken,
    #[error("client_id is required")]
    MissingClientId,
    #[error("server.port must be non-zero")]
    InvalidPort,
    #[error("status.timeout_secs must be non-zero")]
    InvalidTimeout,
    #[error("commands.uptime must list at least one prefix")]
    NoUptimePrefixes,
    #[error("commands.uptime contains an empty prefix")]
    EmptyUptimePrefix,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // Identity
    if config.username.trim().is_empty() {
        errors.push(ValidationError::MissingUsername);
    }

    let channel = &config.channel;
    if channel.is_empty() {
        errors.push(ValidationError::MissingChannel);
    } else {
        if channel.starts_with('#') {
            errors.push(ValidationError::ChannelHasHash(channel.clone()));
        }
        if channel.chars().any(char::is_whitespace) {
            errors.push(ValidationError::ChannelHasWhitespace(channel.clone()));
        }
    }

    // Secrets
    if config.oauth_token.is_empty() {
        errors.push(ValidationError::MissingOauthToken);
    }
    if config.client_id.is_empty() {
        errors.push(ValidationError::MissingClientId);
    }

    if config.server.port == 0 {
        errors.push(ValidationError::InvalidPort);
    }
    if config.status.timeout_secs == 0 {
        errors.push(ValidationError::InvalidTimeout);
    }

    let prefixes = &config.commands.uptime;
    if prefixes.is_empty() {
        errors.push(ValidationError::NoUptimePrefixes);
    } else if prefixes.iter().any(|p| p.is_empty()) {
        errors.push(ValidationError::EmptyUptimePrefix);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
