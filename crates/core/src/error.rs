// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised while preparing or invoking a listener
//!
//! Every variant carries a numeric code. Codes end up in the `error` record
//! of a log entry, so they are part of the log format and must stay stable.

use thiserror::Error;

/// Code for a handler that cannot be invoked synchronously
pub const NOT_CALLABLE_CODE: i64 = 5730;
/// Code for a listener type whose construction step failed
pub const CONSTRUCTION_FAILED_CODE: i64 = 5731;
/// Code for an async submission whose queue has no receiver
pub const QUEUE_CLOSED_CODE: i64 = 5732;
/// Code for a listener that panicked instead of returning an error
pub const PANICKED_CODE: i64 = 0;

/// Errors produced by listener normalization and invocation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ListenerError {
    /// The invocable is a deferred type reference and cannot be called now.
    #[error("Handler is not callable")]
    NotCallable,

    /// Zero-argument construction of a listener type failed.
    #[error("failed to construct listener {listener}: {message}")]
    Construction { listener: String, message: String },

    /// The listener's own logic failed. Code and message are kept verbatim.
    #[error("{message}")]
    Handler { code: i64, message: String },

    /// The listener panicked during invocation.
    #[error("listener panicked: {message}")]
    Panicked { message: String },

    /// The async job queue was closed before the job could be submitted.
    #[error("async job queue is closed")]
    QueueClosed,
}

impl ListenerError {
    /// Failure raised by a listener's own logic
    pub fn handler(code: i64, message: impl Into<String>) -> Self {
        Self::Handler {
            code,
            message: message.into(),
        }
    }

    /// Failure raised by a listener type's construction step
    pub fn construction(listener: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Construction {
            listener: listener.into(),
            message: message.into(),
        }
    }

    /// Numeric code recorded in the log
    pub fn code(&self) -> i64 {
        match self {
            ListenerError::NotCallable => NOT_CALLABLE_CODE,
            ListenerError::Construction { .. } => CONSTRUCTION_FAILED_CODE,
            ListenerError::Handler { code, .. } => *code,
            ListenerError::Panicked { .. } => PANICKED_CODE,
            ListenerError::QueueClosed => QUEUE_CLOSED_CODE,
        }
    }

    /// Short stable label (snake_case) for tracing fields
    pub fn as_label(&self) -> &'static str {
        match self {
            ListenerError::NotCallable => "not_callable",
            ListenerError::Construction { .. } => "construction_failed",
            ListenerError::Handler { .. } => "handler_failed",
            ListenerError::Panicked { .. } => "handler_panicked",
            ListenerError::QueueClosed => "queue_closed",
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
