//! Date-based rotation: archiving aged logs and removing expired ones

use chrono::NaiveDate;
use chronicle_core::{
    archive_file_name, LoggerConfig, RemovalScope, ARCHIVE_EXTENSION, DATE_STAMP_FORMAT,
    DEFAULT_ARCHIVE_AFTER_DAYS, DEFAULT_REMOVE_AFTER_DAYS, LOG_EXTENSION,
};
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::archive::archive_file;
use crate::console::Console;

/// Log rotation configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationConfig {
    /// Logs strictly older than this many days are archived
    pub archive_after_days: u32,
    /// Files strictly older than this many days are removed
    pub remove_after_days: u32,
    /// Whether archives expire along with logs
    pub removal_scope: RemovalScope,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            archive_after_days: DEFAULT_ARCHIVE_AFTER_DAYS,
            remove_after_days: DEFAULT_REMOVE_AFTER_DAYS,
            removal_scope: RemovalScope::default(),
        }
    }
}

impl RotationConfig {
    pub fn new(archive_after_days: u32, remove_after_days: u32) -> Self {
        Self {
            archive_after_days,
            remove_after_days,
            ..Default::default()
        }
    }

    pub fn with_removal_scope(mut self, scope: RemovalScope) -> Self {
        self.removal_scope = scope;
        self
    }

    fn is_expired(&self, age_days: i64) -> bool {
        age_days > i64::from(self.remove_after_days)
    }

    fn is_stale(&self, age_days: i64) -> bool {
        age_days > i64::from(self.archive_after_days)
    }
}

impl From<&LoggerConfig> for RotationConfig {
    fn from(config: &LoggerConfig) -> Self {
        Self {
            archive_after_days: config.archive_after_days,
            remove_after_days: config.remove_after_days,
            removal_scope: config.removal_scope,
        }
    }
}

/// Kind of dated file found in the log directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatedKind {
    Log,
    Archive,
}

/// A `<name>-<YYYYMMDD>.log` or `.tar.gz` file in the log directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedFile {
    pub path: PathBuf,
    pub date: NaiveDate,
    pub kind: DatedKind,
}

impl DatedFile {
    /// Whole days between the file's date and `today`
    pub fn age_days(&self, today: NaiveDate) -> i64 {
        (today - self.date).num_days()
    }
}

/// Result of the scans run when the active file changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationOutcome {
    /// Log directory missing or empty; nothing was scanned
    Skipped,
    Completed { archived: usize, removed: usize },
}

/// Matcher for one app's dated file names
pub struct FileMatcher {
    pattern: Regex,
}

impl FileMatcher {
    pub fn new(name: &str) -> Self {
        let pattern = format!(
            r"^{}-([0-9]{{8}})\.({}|{})$",
            regex::escape(name),
            regex::escape(LOG_EXTENSION),
            regex::escape(ARCHIVE_EXTENSION),
        );
        Self {
            pattern: Regex::new(&pattern).expect("Invalid dated file regex"),
        }
    }

    /// Match a file name.
    ///
    /// `None` when the name is not one of ours, `Some(Err)` when it is but
    /// the embedded date is not a real calendar date.
    pub fn parse(&self, file_name: &str) -> Option<Result<(NaiveDate, DatedKind), String>> {
        let caps = self.pattern.captures(file_name)?;
        let stamp = &caps[1];
        let kind = if &caps[2] == LOG_EXTENSION {
            DatedKind::Log
        } else {
            DatedKind::Archive
        };
        Some(
            NaiveDate::parse_from_str(stamp, DATE_STAMP_FORMAT)
                .map(|date| (date, kind))
                .map_err(|e| format!("Malformed date {:?} in {}: {}", stamp, file_name, e)),
        )
    }
}

/// List the dated files of `name` in `log_dir`.
///
/// Unreadable entries and malformed dates are reported and skipped.
pub fn scan_dated_files(log_dir: &Path, name: &str, console: &dyn Console) -> Vec<DatedFile> {
    let entries = match fs::read_dir(log_dir) {
        Ok(entries) => entries,
        Err(e) => {
            report(console, &format!("Cannot read log directory {}: {}", log_dir.display(), e));
            return Vec::new();
        }
    };

    let matcher = FileMatcher::new(name);
    let mut files = Vec::new();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                report(console, &format!("Cannot read entry in {}: {}", log_dir.display(), e));
                continue;
            }
        };

        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }

        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };

        match matcher.parse(file_name) {
            None => {}
            Some(Ok((date, kind))) => files.push(DatedFile {
                path: entry.path(),
                date,
                kind,
            }),
            Some(Err(msg)) => report(console, &msg),
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

/// Archive every log older than the archive threshold.
///
/// Each log is compressed alone into a sibling `<name>-<date>.tar.gz`
/// and then deleted. Logs already past the removal threshold are left
/// for the removal scan. Returns the number of logs archived.
pub fn archive_old_logs(
    log_dir: &Path,
    name: &str,
    today: NaiveDate,
    config: &RotationConfig,
    console: &dyn Console,
) -> usize {
    let mut archived = 0;

    for file in scan_dated_files(log_dir, name, console) {
        let age = file.age_days(today);
        if file.kind != DatedKind::Log || !config.is_stale(age) || config.is_expired(age) {
            continue;
        }

        let stamp = file.date.format(DATE_STAMP_FORMAT).to_string();
        let target = log_dir.join(archive_file_name(name, &stamp));

        match archive_file(&file.path, &target) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                report(
                    console,
                    &format!(
                        "Archive {} already exists, keeping {}",
                        target.display(),
                        file.path.display()
                    ),
                );
                continue;
            }
            Err(e) => {
                report(console, &format!("Failed to archive {}: {}", file.path.display(), e));
                continue;
            }
        }
        if let Err(e) = fs::remove_file(&file.path) {
            report(
                console,
                &format!("Archived but failed to remove {}: {}", file.path.display(), e),
            );
            continue;
        }

        debug!("Archived {} to {}", file.path.display(), target.display());
        archived += 1;
    }

    archived
}

/// Remove every file older than the removal threshold.
///
/// Archives are only considered when the removal scope includes them.
/// Returns the number of files removed.
pub fn remove_old_logs(
    log_dir: &Path,
    name: &str,
    today: NaiveDate,
    config: &RotationConfig,
    console: &dyn Console,
) -> usize {
    let mut removed = 0;

    for file in scan_dated_files(log_dir, name, console) {
        if file.kind == DatedKind::Archive && !config.removal_scope.includes_archives() {
            continue;
        }
        if !config.is_expired(file.age_days(today)) {
            continue;
        }

        match fs::remove_file(&file.path) {
            Ok(()) => {
                debug!("Removed expired {}", file.path.display());
                removed += 1;
            }
            Err(e) => report(console, &format!("Failed to remove {}: {}", file.path.display(), e)),
        }
    }

    removed
}

/// Run the archive scan and then the removal scan.
///
/// Both are skipped when the directory is absent or has no entries.
pub fn rotate(
    log_dir: &Path,
    name: &str,
    today: NaiveDate,
    config: &RotationConfig,
    console: &dyn Console,
) -> RotationOutcome {
    let has_entries = fs::read_dir(log_dir)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false);
    if !has_entries {
        info!("Log directory {} is empty or absent, skipping scans", log_dir.display());
        return RotationOutcome::Skipped;
    }

    let archived = archive_old_logs(log_dir, name, today, config, console);
    let removed = remove_old_logs(log_dir, name, today, config, console);
    RotationOutcome::Completed { archived, removed }
}

fn report(console: &dyn Console, message: &str) {
    warn!("{}", message);
    console.err(message);
}
