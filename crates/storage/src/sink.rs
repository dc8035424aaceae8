// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log sink for dispatcher batches
//!
//! Each batch is one JSON array on a single line, followed by a blank line.
//! Writes are best-effort: [`LogSink::append`] never fails its caller.

use eventbus_core::{LogEntry, DEFAULT_LOG_FILE};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur in sink operations
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Append-only destination for log batches
#[derive(Debug, Clone)]
pub struct LogSink {
    path: PathBuf,
}

impl LogSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Change the destination; takes effect on the next call
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    /// Append a batch, swallowing any failure
    ///
    /// Failures are reported through tracing only.
    pub fn append(&self, batch: &[LogEntry]) {
        if let Err(e) = self.try_append(batch) {
            tracing::warn!(
                path = %self.path.display(),
                entries = batch.len(),
                error = %e,
                "failed to append log batch"
            );
        }
    }

    /// Append a batch, reporting failures
    ///
    /// An empty batch is a no-op and does not touch the destination.
    pub fn try_append(&self, batch: &[LogEntry]) -> Result<(), SinkError> {
        if batch.is_empty() {
            return Ok(());
        }

        let json = serde_json::to_string(batch)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        write!(file, "{json}\n\n")?;
        Ok(())
    }

    /// Full contents of the destination, or "" if it does not exist
    pub fn read_all(&self) -> String {
        match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read log");
                String::new()
            }
        }
    }

    /// Parse every batch written to the destination
    pub fn read_batches(&self) -> Result<Vec<Vec<LogEntry>>, SinkError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut batches = Vec::new();
        for line in contents.lines() {
            if line.trim().is_empty() {
                continue;
            }
            batches.push(serde_json::from_str(line)?);
        }

        Ok(batches)
    }

    /// Remove the destination if it exists
    pub fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to clear log");
            }
        }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_FILE)
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
