//! Core types for Chronicle

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::constants::*;
use crate::error::{Error, Result};
use crate::name::normalize;

/// Regex pattern for valid app names: alphanumeric, underscore, hyphen and dot
static APP_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.-]+$").expect("Invalid app name regex")
});

/// Validate an app name to prevent path traversal attacks
pub fn validate_app_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && APP_NAME_REGEX.is_match(name)
}

/// Severity of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Critical,
    Fatal,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// Levels mirrored to the error console stream
    pub fn is_error(&self) -> bool {
        matches!(self, LogLevel::Error | LogLevel::Critical | LogLevel::Fatal)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" => Ok(LogLevel::Critical),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(Error::InvalidLevel(s.to_string())),
        }
    }
}

/// How the host program runs, which decides name normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionContext {
    /// Native binary: names are kept verbatim
    #[default]
    Compiled,
    /// Interpreted source: names are kebab-cased
    Interpreted,
}

impl FromStr for ExecutionContext {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "compiled" | "binary" => Ok(ExecutionContext::Compiled),
            "interpreted" | "script" => Ok(ExecutionContext::Interpreted),
            _ => Err(Error::InvalidContext(s.to_string())),
        }
    }
}

/// Which files the removal scan is allowed to delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalScope {
    /// Only expired `.log` files
    #[default]
    LogsOnly,
    /// Expired `.log` files and their `.tar.gz` archives
    LogsAndArchives,
}

impl RemovalScope {
    pub fn includes_archives(&self) -> bool {
        matches!(self, RemovalScope::LogsAndArchives)
    }
}

impl FromStr for RemovalScope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "logs_only" | "logs" => Ok(RemovalScope::LogsOnly),
            "logs_and_archives" | "all" => Ok(RemovalScope::LogsAndArchives),
            _ => Err(Error::InvalidScope(s.to_string())),
        }
    }
}

/// Application name as given and as used on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerIdentity {
    raw_name: String,
    normalized_name: String,
}

impl LoggerIdentity {
    /// Names are taken as given; surrounding whitespace is rejected.
    pub fn new(raw_name: &str, context: ExecutionContext) -> Result<Self> {
        if !validate_app_name(raw_name) {
            return Err(Error::InvalidName(raw_name.to_string()));
        }

        Ok(Self {
            raw_name: raw_name.to_string(),
            normalized_name: normalize(raw_name, context),
        })
    }

    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    pub fn normalized_name(&self) -> &str {
        &self.normalized_name
    }
}

/// The file currently receiving appended entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveLogFile {
    pub path: PathBuf,
    pub date_stamp: String,
}

impl ActiveLogFile {
    pub fn for_date(log_dir: &Path, name: &str, date: NaiveDate) -> Self {
        let date_stamp = date.format(DATE_STAMP_FORMAT).to_string();
        Self {
            path: log_path(log_dir, name, &date_stamp),
            date_stamp,
        }
    }
}
