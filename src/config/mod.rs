//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Config struct definitions and the TOML loader
//! - [`validation`]: startup validation of a loaded config

mod types;
mod validation;

pub use types::{
    CommandsConfig, Config, ConfigError, Secret, ServerConfig, SessionConfig, StatusConfig,
};
pub use validation::{ValidationError, validate};
