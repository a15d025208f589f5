//! Console streams that entries and diagnostics are mirrored to

use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Destination for mirrored entries and diagnostics
pub trait Console {
    /// Write a line to the standard output stream
    fn out(&self, line: &str);

    /// Write a line to the error stream
    fn err(&self, line: &str);
}

/// The process's real stdout and stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn out(&self, line: &str) {
        // A closed stdout must not take the host process down
        let _ = writeln!(std::io::stdout().lock(), "{}", line);
    }

    fn err(&self, line: &str) {
        let _ = writeln!(std::io::stderr().lock(), "{}", line);
    }
}

/// Console that records lines in memory; clones share the same buffers
#[derive(Debug, Clone, Default)]
pub struct MemoryConsole {
    out: Arc<Mutex<Vec<String>>>,
    err: Arc<Mutex<Vec<String>>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines written to stdout
    pub fn stdout(&self) -> Vec<String> {
        self.out.lock().clone()
    }

    /// All lines written to stderr
    pub fn stderr(&self) -> Vec<String> {
        self.err.lock().clone()
    }

    pub fn stdout_contains(&self, needle: &str) -> bool {
        self.out.lock().iter().any(|l| l.contains(needle))
    }

    pub fn stderr_contains(&self, needle: &str) -> bool {
        self.err.lock().iter().any(|l| l.contains(needle))
    }

    pub fn clear(&self) {
        self.out.lock().clear();
        self.err.lock().clear();
    }
}

impl Console for MemoryConsole {
    fn out(&self, line: &str) {
        self.out.lock().push(line.to_string());
    }

    fn err(&self, line: &str) {
        self.err.lock().push(line.to_string());
    }
}
