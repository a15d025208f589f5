//! Entry formatting and appending

use chrono::NaiveDateTime;
use chronicle_core::{LogLevel, ENTRY_TIMESTAMP_FORMAT};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use tracing::warn;

use crate::console::Console;

/// Format one entry, without the trailing newline.
///
/// `[YYYY-MM-DD HH:MM:SS] pid:<pid> [<LEVEL>] @<component> :] <message>`,
/// where the ` @<component>` part is dropped for an empty component.
/// Line breaks inside the message become single spaces so an entry
/// always stays on one line.
pub fn format_entry(
    timestamp: NaiveDateTime,
    pid: u32,
    level: LogLevel,
    component: Option<&str>,
    message: &str,
) -> String {
    let component = match component.map(str::trim) {
        Some(c) if !c.is_empty() => format!(" @{}", c),
        _ => String::new(),
    };
    format!(
        "[{}] pid:{} [{}]{} :] {}",
        timestamp.format(ENTRY_TIMESTAMP_FORMAT),
        pid,
        level,
        component,
        single_line(message)
    )
}

fn single_line(message: &str) -> String {
    message
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Open `path` for appending, creating it when missing
pub fn probe(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Appends entries to log files and mirrors them to the console.
///
/// No handle is kept between calls: every entry opens, writes and closes
/// its file.
pub struct LogWriter {
    console: Box<dyn Console>,
    pid: u32,
}

impl LogWriter {
    pub fn new(console: Box<dyn Console>) -> Self {
        Self {
            console,
            pid: std::process::id(),
        }
    }

    pub fn console(&self) -> &dyn Console {
        self.console.as_ref()
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Append one entry to `path`.
    ///
    /// Returns false when the entry was dropped; the reason has already
    /// been reported on the error stream.
    pub fn write_entry(
        &self,
        path: &Path,
        timestamp: NaiveDateTime,
        level: LogLevel,
        component: Option<&str>,
        message: &str,
    ) -> bool {
        let mut file = match probe(path) {
            Ok(file) => file,
            Err(e) => {
                self.diagnostic(&format!("Cannot write to {}: {}", path.display(), e));
                return false;
            }
        };

        let line = format_entry(timestamp, self.pid, level, component, message);
        if let Err(e) = writeln!(file, "{}", line) {
            self.diagnostic(&format!("Failed to append to {}: {}", path.display(), e));
            return false;
        }

        if level.is_error() {
            self.console.err(&line);
        } else {
            self.console.out(&line);
        }
        true
    }

    /// Report a recovered failure on the error stream
    pub fn diagnostic(&self, message: &str) {
        warn!("{}", message);
        self.console.err(message);
    }
}
