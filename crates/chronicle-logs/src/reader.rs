//! Log reader for tail operations

use chronicle_core::Result;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Reads back entries from a log file
pub struct LogReader {
    path: PathBuf,
}

impl LogReader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the last N lines from the log file
    pub fn tail(&self, n: usize) -> Result<Vec<String>> {
        if !self.path.exists() || n == 0 {
            return Ok(vec![]);
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);

        let mut lines: VecDeque<String> = VecDeque::with_capacity(n + 1);
        for line_result in reader.lines() {
            lines.push_back(line_result?);
            if lines.len() > n {
                lines.pop_front();
            }
        }

        Ok(lines.into_iter().collect())
    }

    /// Check if the log file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
