//! The logger an application holds

use chrono::NaiveDate;
use chronicle_core::{
    ActiveLogFile, EnvironmentLocator, ExecutionContext, LogLevel, LoggerConfig, LoggerIdentity,
    PathResolver, PrivilegeOracle, RemovalScope, Result, SystemEnvironment, SystemPrivilege,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::console::{Console, StdConsole};
use crate::rotation::{self, RotationConfig, RotationOutcome};
use crate::writer::LogWriter;

/// Date-rotated file logger.
///
/// Entries go to `<log_dir>/<name>-<YYYYMMDD>.log`. The first write of a
/// new day switches the active file and runs the archive and removal
/// scans. Routine filesystem failures never surface as errors: they are
/// reported on the error stream and the entry is dropped.
pub struct ChronicleLogger {
    identity: LoggerIdentity,
    paths: PathResolver,
    rotation: RotationConfig,
    debug: bool,
    writer: LogWriter,
    clock: Box<dyn Clock>,
    active: Option<ActiveLogFile>,
}

impl ChronicleLogger {
    /// Logger with automatically resolved directories
    pub fn new(name: &str) -> Result<Self> {
        Self::builder(name).build()
    }

    /// Logger with directory overrides; an empty path means auto-resolve
    pub fn with_dirs(name: &str, log_dir: impl AsRef<Path>, base_dir: impl AsRef<Path>) -> Result<Self> {
        Self::builder(name)
            .log_dir(log_dir.as_ref())
            .base_dir(base_dir.as_ref())
            .build()
    }

    pub fn builder(name: impl Into<String>) -> ChronicleLoggerBuilder {
        ChronicleLoggerBuilder::new(name)
    }

    /// Write one entry.
    ///
    /// Returns false when the entry was dropped after a diagnostic.
    pub fn log_message(&mut self, message: &str, level: LogLevel, component: Option<&str>) -> bool {
        let now = self.clock.now();
        let (path, rotated) = self.refresh_active_file(now.date());

        if rotated && self.debug {
            let header = format!("Active log file: {}", path.display());
            self.writer.write_entry(&path, now, LogLevel::Info, None, &header);
        }

        self.writer.write_entry(&path, now, level, component, message)
    }

    pub fn log(&mut self, level: LogLevel, message: &str) -> bool {
        self.log_message(message, level, None)
    }

    pub fn debug(&mut self, message: &str) -> bool {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&mut self, message: &str) -> bool {
        self.log(LogLevel::Info, message)
    }

    pub fn warn(&mut self, message: &str) -> bool {
        self.log(LogLevel::Warn, message)
    }

    pub fn error(&mut self, message: &str) -> bool {
        self.log(LogLevel::Error, message)
    }

    pub fn critical(&mut self, message: &str) -> bool {
        self.log(LogLevel::Critical, message)
    }

    pub fn fatal(&mut self, message: &str) -> bool {
        self.log(LogLevel::Fatal, message)
    }

    /// Normalized name used on disk
    pub fn name(&self) -> &str {
        self.identity.normalized_name()
    }

    /// Name as passed at construction
    pub fn raw_name(&self) -> &str {
        self.identity.raw_name()
    }

    pub fn base_dir(&mut self) -> &Path {
        self.paths.base_dir()
    }

    pub fn log_dir(&mut self) -> &Path {
        self.paths.log_dir()
    }

    pub fn set_base_dir(&mut self, dir: impl Into<PathBuf>) {
        self.paths.set_base_dir(dir);
    }

    /// Replace the log directory; the next write switches to it
    pub fn set_log_dir(&mut self, dir: impl Into<PathBuf>) {
        self.paths.set_log_dir(dir);
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn is_root(&self) -> bool {
        self.paths.privilege().is_root()
    }

    pub fn can_passwordless_elevate(&self) -> bool {
        self.paths.privilege().can_passwordless_elevate()
    }

    pub fn rotation_config(&self) -> &RotationConfig {
        &self.rotation
    }

    /// File that received the last write, if any
    pub fn active_file(&self) -> Option<&ActiveLogFile> {
        self.active.as_ref()
    }

    /// Path today's entries go to
    pub fn current_log_path(&mut self) -> PathBuf {
        let today = self.clock.today();
        let name = self.identity.normalized_name().to_string();
        ActiveLogFile::for_date(self.paths.log_dir(), &name, today).path
    }

    /// Archive aged logs now; returns how many were archived
    pub fn archive_old_logs(&mut self) -> usize {
        let today = self.clock.today();
        let log_dir = self.paths.log_dir().to_path_buf();
        rotation::archive_old_logs(
            &log_dir,
            self.identity.normalized_name(),
            today,
            &self.rotation,
            self.writer.console(),
        )
    }

    /// Remove expired files now; returns how many were removed
    pub fn remove_old_logs(&mut self) -> usize {
        let today = self.clock.today();
        let log_dir = self.paths.log_dir().to_path_buf();
        rotation::remove_old_logs(
            &log_dir,
            self.identity.normalized_name(),
            today,
            &self.rotation,
            self.writer.console(),
        )
    }

    /// Run both scans now, exactly as a date change would
    pub fn run_lifecycle(&mut self) -> RotationOutcome {
        let today = self.clock.today();
        let log_dir = self.paths.log_dir().to_path_buf();
        self.scan(&log_dir, today)
    }

    /// Recompute the active file for `today`, rotating when it changed.
    ///
    /// Returns the active path and whether a rotation happened.
    fn refresh_active_file(&mut self, today: NaiveDate) -> (PathBuf, bool) {
        let log_dir = self.paths.log_dir().to_path_buf();
        let next = ActiveLogFile::for_date(&log_dir, self.identity.normalized_name(), today);

        if let Some(active) = &self.active {
            if active.path == next.path {
                return (next.path, false);
            }
        }

        self.scan(&log_dir, today);
        debug!("Rotating to {}", next.path.display());
        let path = next.path.clone();
        self.active = Some(next);
        self.ensure_log_dir(&log_dir);
        (path, true)
    }

    fn scan(&self, log_dir: &Path, today: NaiveDate) -> RotationOutcome {
        let outcome = rotation::rotate(
            log_dir,
            self.identity.normalized_name(),
            today,
            &self.rotation,
            self.writer.console(),
        );
        if outcome == RotationOutcome::Skipped && self.debug {
            self.writer.console().out(&format!(
                "Log directory {} is empty or absent, nothing to archive",
                log_dir.display()
            ));
        }
        outcome
    }

    fn ensure_log_dir(&self, log_dir: &Path) {
        if log_dir.exists() {
            return;
        }
        if let Err(e) = fs::create_dir_all(log_dir) {
            self.writer.diagnostic(&format!(
                "Cannot create log directory {}: {}",
                log_dir.display(),
                e
            ));
        }
    }
}

/// Builder for [`ChronicleLogger`]
pub struct ChronicleLoggerBuilder {
    name: String,
    log_dir: Option<PathBuf>,
    base_dir: Option<PathBuf>,
    config: LoggerConfig,
    privilege: Box<dyn PrivilegeOracle>,
    environment: Box<dyn EnvironmentLocator>,
    clock: Box<dyn Clock>,
    console: Box<dyn Console>,
}

impl ChronicleLoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            log_dir: None,
            base_dir: None,
            config: LoggerConfig::default(),
            privilege: Box::new(SystemPrivilege),
            environment: Box::new(SystemEnvironment),
            clock: Box::new(SystemClock),
            console: Box::new(StdConsole),
        }
    }

    /// Log directory override; an empty path means auto-resolve
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// Base directory override; an empty path means auto-resolve
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn context(mut self, context: ExecutionContext) -> Self {
        self.config.context = context;
        self
    }

    pub fn debug(mut self, enabled: bool) -> Self {
        self.config.debug = Some(enabled);
        self
    }

    pub fn archive_after_days(mut self, days: u32) -> Self {
        self.config.archive_after_days = days;
        self
    }

    pub fn remove_after_days(mut self, days: u32) -> Self {
        self.config.remove_after_days = days;
        self
    }

    pub fn removal_scope(mut self, scope: RemovalScope) -> Self {
        self.config.removal_scope = scope;
        self
    }

    pub fn privilege(mut self, oracle: impl PrivilegeOracle + 'static) -> Self {
        self.privilege = Box::new(oracle);
        self
    }

    pub fn environment(mut self, locator: impl EnvironmentLocator + 'static) -> Self {
        self.environment = Box::new(locator);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn console(mut self, console: impl Console + 'static) -> Self {
        self.console = Box::new(console);
        self
    }

    /// Build the logger and create its log directory if missing.
    ///
    /// Fails only on invalid configuration: a bad name or inverted
    /// thresholds. A directory that cannot be created is reported and
    /// left for the write path to deal with.
    pub fn build(self) -> Result<ChronicleLogger> {
        self.config.validate()?;
        let identity = LoggerIdentity::new(&self.name, self.config.context)?;

        let mut paths = PathResolver::new(
            identity.normalized_name(),
            self.privilege,
            self.environment,
        );
        if let Some(dir) = self.base_dir {
            paths.set_base_dir(dir);
        }
        if let Some(dir) = self.log_dir {
            paths.set_log_dir(dir);
        }

        let mut logger = ChronicleLogger {
            rotation: RotationConfig::from(&self.config),
            debug: self.config.debug_enabled(),
            identity,
            paths,
            writer: LogWriter::new(self.console),
            clock: self.clock,
            active: None,
        };

        let log_dir = logger.paths.log_dir().to_path_buf();
        logger.ensure_log_dir(&log_dir);
        Ok(logger)
    }
}
