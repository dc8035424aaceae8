// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log entry format
//!
//! Field names are part of the on-disk format and must not change:
//! `event_name`, `data`, `listenerIndex`, `isAsync`, and exactly one of
//! `result` or `error: {code, message}`.

use crate::error::ListenerError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error half of a failed entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub code: i64,
    pub message: String,
}

impl From<&ListenerError> for ErrorRecord {
    fn from(error: &ListenerError) -> Self {
        Self {
            code: error.code(),
            message: error.to_string(),
        }
    }
}

/// Result or error of one listener invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Result(Value),
    Error(ErrorRecord),
}

/// One logged listener invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub event_name: String,
    /// Payload snapshot
    pub data: Value,
    /// Position of the listener in the registry at trigger time
    #[serde(rename = "listenerIndex")]
    pub listener_index: usize,
    /// Absent when normalization failed before the flag was known
    #[serde(rename = "isAsync", default, skip_serializing_if = "Option::is_none")]
    pub is_async: Option<bool>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Entries produced by a single trigger, in listener order
pub type LogBatch = Vec<LogEntry>;

impl LogEntry {
    pub fn result(
        event_name: impl Into<String>,
        data: Value,
        listener_index: usize,
        is_async: bool,
        result: Value,
    ) -> Self {
        Self {
            event_name: event_name.into(),
            data,
            listener_index,
            is_async: Some(is_async),
            outcome: Outcome::Result(result),
        }
    }

    pub fn error(
        event_name: impl Into<String>,
        data: Value,
        listener_index: usize,
        is_async: Option<bool>,
        error: &ListenerError,
    ) -> Self {
        Self {
            event_name: event_name.into(),
            data,
            listener_index,
            is_async,
            outcome: Outcome::Error(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error(_))
    }

    pub fn result_value(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Result(value) => Some(value),
            Outcome::Error(_) => None,
        }
    }

    pub fn error_record(&self) -> Option<&ErrorRecord> {
        match &self.outcome {
            Outcome::Result(_) => None,
            Outcome::Error(record) => Some(record),
        }
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
