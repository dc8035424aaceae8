// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! eventbus-core: listener model for the in-process event dispatcher
//!
//! This crate provides:
//! - The listener capability (`EventListener`) and direct handler closures
//! - Listener declarations and their normalization into descriptors
//! - Synchronous invocation with output capture and panic isolation
//! - The structured log entry format written by the dispatcher
//! - Dispatcher configuration

pub mod config;
pub mod error;
pub mod invoke;
pub mod listener;
pub mod log;
pub mod normalize;
pub mod output;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub mod fake;

// Re-exports
pub use config::{ConfigError, DispatcherConfig, DEFAULT_LOG_FILE, LOG_FILE_ENV};
pub use error::ListenerError;
pub use invoke::{execute_now, invoke_captured, isolate};
pub use listener::{
    EventListener, Handler, HandlerFn, HandlerRef, ListenerBundle, ListenerDeclaration,
    ListenerType,
};
pub use log::{ErrorRecord, LogBatch, LogEntry, Outcome};
pub use normalize::{normalize, Invocable, ListenerDescriptor};
pub use output::Output;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{
    EchoListener, FailingConstruction, FakeListener, ListenerCall, PanickingConstruction,
};
