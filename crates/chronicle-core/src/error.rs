//! Error types for Chronicle

use std::path::PathBuf;

/// Chronicle error type
///
/// Only configuration problems surface through this type. Filesystem
/// failures during logging are reported on the error stream instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid application name: {0:?}")]
    InvalidName(String),

    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    #[error("Invalid removal scope: {0}")]
    InvalidScope(String),

    #[error("Invalid execution context: {0}")]
    InvalidContext(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Result type alias for Chronicle
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::ConfigError(msg.into())
    }
}
