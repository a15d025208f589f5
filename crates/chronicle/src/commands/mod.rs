//! Command implementations

pub mod paths;
pub mod rotate;
pub mod tail;
pub mod write;

use anyhow::{Context, Result};
use chronicle_core::{ExecutionContext, LoggerConfig, RemovalScope, CONFIG_FILES};
use chronicle_logs::ChronicleLogger;
use std::path::Path;
use tracing::debug;

use crate::cli::TargetArgs;

/// Load the config: an explicit file, else one found in the working directory
fn load_config(explicit: Option<&Path>) -> Result<LoggerConfig> {
    if let Some(path) = explicit {
        return LoggerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    let cwd = std::env::current_dir()?;
    if CONFIG_FILES.iter().any(|name| cwd.join(name).exists()) {
        let (config, path) = LoggerConfig::find_and_load(&cwd)?;
        debug!("Loaded config from {}", path.display());
        return Ok(config);
    }

    Ok(LoggerConfig::default())
}

/// Build a logger from the shared target arguments; flags win over the config file
pub fn build_logger(target: &TargetArgs) -> Result<ChronicleLogger> {
    let mut config = load_config(target.config.as_deref())?;

    if target.interpreted {
        config.context = ExecutionContext::Interpreted;
    }
    if let Some(days) = target.archive_after_days {
        config.archive_after_days = days;
    }
    if let Some(days) = target.remove_after_days {
        config.remove_after_days = days;
    }
    if target.expire_archives {
        config.removal_scope = RemovalScope::LogsAndArchives;
    }

    let mut builder = ChronicleLogger::builder(&target.name).config(config);
    if let Some(dir) = &target.log_dir {
        builder = builder.log_dir(dir);
    }
    if let Some(dir) = &target.base_dir {
        builder = builder.base_dir(dir);
    }

    Ok(builder.build()?)
}
