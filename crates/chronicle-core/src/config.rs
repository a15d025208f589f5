//! Logger configuration
//!
//! Supports multiple configuration file formats:
//! - TOML (.toml)
//! - YAML (.yaml, .yml)
//! - JSON (.json)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::error::{Error, Result};
use crate::types::{ExecutionContext, RemovalScope};

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(ConfigFormat::Toml),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }

    /// Detect format from file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

fn default_archive_after_days() -> u32 {
    DEFAULT_ARCHIVE_AFTER_DAYS
}

fn default_remove_after_days() -> u32 {
    DEFAULT_REMOVE_AFTER_DAYS
}

/// Lifecycle and naming settings fixed at construction time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggerConfig {
    /// Logs strictly older than this many days are archived (default: 7)
    #[serde(default = "default_archive_after_days")]
    pub archive_after_days: u32,
    /// Files strictly older than this many days are removed (default: 30)
    #[serde(default = "default_remove_after_days")]
    pub remove_after_days: u32,
    /// Whether removal also expires `.tar.gz` archives
    #[serde(default)]
    pub removal_scope: RemovalScope,
    /// Compiled keeps names verbatim, interpreted kebab-cases them
    #[serde(default)]
    pub context: ExecutionContext,
    /// Force debug headers on or off; unset reads `DEBUG=show`
    #[serde(default)]
    pub debug: Option<bool>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            archive_after_days: DEFAULT_ARCHIVE_AFTER_DAYS,
            remove_after_days: DEFAULT_REMOVE_AFTER_DAYS,
            removal_scope: RemovalScope::default(),
            context: ExecutionContext::default(),
            debug: None,
        }
    }
}

impl LoggerConfig {
    /// Load config from file, automatically detecting format from extension
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            Error::ConfigError(format!(
                "Unsupported config file extension: {}. Expected .toml, .yaml, .yml, or .json",
                path.display()
            ))
        })?;

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Parse config content with specified format, then validate it
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        let config: LoggerConfig = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Find and load config file from a directory
    pub fn find_and_load(dir: &Path) -> Result<(Self, PathBuf)> {
        for name in CONFIG_FILES {
            let path = dir.join(name);
            if path.exists() {
                let config = Self::load(&path)?;
                return Ok((config, path));
            }
        }
        Err(Error::ConfigError(format!(
            "No config file found in {}. Expected one of: {:?}",
            dir.display(),
            CONFIG_FILES
        )))
    }

    pub fn validate(&self) -> Result<()> {
        if self.remove_after_days < self.archive_after_days {
            return Err(Error::config(format!(
                "remove_after_days ({}) must not be less than archive_after_days ({})",
                self.remove_after_days, self.archive_after_days
            )));
        }
        Ok(())
    }

    /// Debug mode, falling back to the environment when not forced
    pub fn debug_enabled(&self) -> bool {
        self.debug.unwrap_or_else(debug_from_env)
    }
}
