// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Captured listener output
//!
//! Listeners never get the host's stdout. Anything they print goes into an
//! [`Output`] buffer owned by the invocation, which is dropped afterwards.

use std::io;

/// In-memory sink for incidental output written by a listener
#[derive(Debug, Default)]
pub struct Output {
    buf: Vec<u8>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Captured bytes, lossily decoded
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf).to_string()
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
