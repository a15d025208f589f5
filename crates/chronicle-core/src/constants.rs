//! Constants and default values for Chronicle

use std::path::{Path, PathBuf};

/// Subdirectory holding per-app state under an environment root
pub const ENV_APP_DIR: &str = ".app";

/// Log directory name appended to a base directory
pub const LOG_SUBDIR: &str = "log";

/// Root of privileged base directories
pub const SYSTEM_BASE_ROOT: &str = "/var";

/// Root of privileged log directories
pub const SYSTEM_LOG_ROOT: &str = "/var/log";

/// Extension of active log files
pub const LOG_EXTENSION: &str = "log";

/// Extension of compressed archives
pub const ARCHIVE_EXTENSION: &str = "tar.gz";

/// Date stamp format embedded in file names
pub const DATE_STAMP_FORMAT: &str = "%Y%m%d";

/// Timestamp format at the head of every entry
pub const ENTRY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Environment variable switching on verbose rotation headers
pub const DEBUG_ENV_VAR: &str = "DEBUG";

/// Value of [`DEBUG_ENV_VAR`] that enables debug mode (case-insensitive)
pub const DEBUG_ENV_VALUE: &str = "show";

/// Default age in days after which a log file is archived
pub const DEFAULT_ARCHIVE_AFTER_DAYS: u32 = 7;

/// Default age in days after which a file is removed
pub const DEFAULT_REMOVE_AFTER_DAYS: u32 = 30;

/// Default number of lines shown by tail
pub const DEFAULT_TAIL_LINES: usize = 20;

/// Default config file names to search for (in priority order)
pub const CONFIG_FILES: &[&str] = &[
    "chronicle.toml",
    "chronicle.yaml",
    "chronicle.yml",
    "chronicle.json",
];

/// File name of the log for `name` on `date_stamp`
pub fn log_file_name(name: &str, date_stamp: &str) -> String {
    format!("{}-{}.{}", name, date_stamp, LOG_EXTENSION)
}

/// File name of the archive for `name` on `date_stamp`
pub fn archive_file_name(name: &str, date_stamp: &str) -> String {
    format!("{}-{}.{}", name, date_stamp, ARCHIVE_EXTENSION)
}

/// Full path of the log for `name` on `date_stamp` inside `log_dir`
pub fn log_path(log_dir: &Path, name: &str, date_stamp: &str) -> PathBuf {
    log_dir.join(log_file_name(name, date_stamp))
}

/// Check whether the `DEBUG` environment variable asks for verbose output
pub fn debug_from_env() -> bool {
    std::env::var(DEBUG_ENV_VAR)
        .map(|v| v.eq_ignore_ascii_case(DEBUG_ENV_VALUE))
        .unwrap_or(false)
}
