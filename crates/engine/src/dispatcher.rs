// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event dispatcher
//!
//! `trigger` invokes every listener registered for an event, in registration
//! order, one at a time. Failures are isolated per listener: a listener that
//! fails to normalize, returns an error, or panics produces an error entry
//! and the remaining listeners still run. Nothing escapes to the caller.

use crate::registry::Registry;
use crate::submit::{AsyncExecutor, AsyncJob, DeferredExecutor};
use eventbus_core::{
    execute_now, isolate, normalize, DispatcherConfig, Invocable, ListenerDeclaration,
    ListenerError, LogEntry,
};
use eventbus_storage::{LogSink, SinkError};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::{Mutex, RwLock};
use std::time::Instant;

/// In-process event dispatcher
///
/// The registry is guarded by a read/write lock and the sink by a mutex, so a
/// dispatcher can be shared across threads. The registry lock is released
/// before listeners run; listeners may register or trigger re-entrantly.
pub struct Dispatcher {
    registry: RwLock<Registry>,
    sink: Mutex<LogSink>,
    executor: Box<dyn AsyncExecutor>,
}

impl Dispatcher {
    /// Dispatcher logging to `event.log` with async listeners deferred
    pub fn new() -> Self {
        Self::from_config(&DispatcherConfig::default())
    }

    pub fn from_config(config: &DispatcherConfig) -> Self {
        Self {
            registry: RwLock::new(Registry::new()),
            sink: Mutex::new(LogSink::new(config.log_path.clone())),
            executor: Box::new(DeferredExecutor),
        }
    }

    /// Replace the executor used for async listeners
    pub fn with_executor(mut self, executor: impl AsyncExecutor + 'static) -> Self {
        self.executor = Box::new(executor);
        self
    }

    // -- Registry --

    pub fn add_listener(&self, event_name: &str, declaration: impl Into<ListenerDeclaration>) {
        self.registry
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .add_listener(event_name, declaration);
    }

    /// Snapshot of the declarations for `event_name`
    pub fn listeners_for_event(&self, event_name: &str) -> Vec<ListenerDeclaration> {
        self.registry
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .listeners_for_event(event_name)
            .to_vec()
    }

    pub fn has_listeners_for_event(&self, event_name: &str) -> bool {
        self.registry
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .has_listeners_for_event(event_name)
    }

    pub fn clear_listeners_for_event(&self, event_name: &str) {
        self.registry
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear_listeners_for_event(event_name);
    }

    /// Event names that currently have listeners
    pub fn event_names(&self) -> Vec<String> {
        self.registry
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .event_names()
    }

    // -- Dispatch --

    /// Invoke every listener for `event_name` with `data`
    ///
    /// Results are observable only through the log sink.
    pub fn trigger(&self, event_name: &str, data: &Value) {
        let span = tracing::info_span!("trigger", event = event_name);
        let _guard = span.enter();

        let listeners = self.listeners_for_event(event_name);
        let start = Instant::now();

        let batch: Vec<LogEntry> = listeners
            .iter()
            .enumerate()
            .filter_map(|(index, declaration)| {
                self.run_listener(event_name, index, declaration, data)
            })
            .collect();

        tracing::info!(
            listeners = listeners.len(),
            logged = batch.len(),
            elapsed_ms = millis_since(start),
            "triggered"
        );

        self.sink.lock().unwrap_or_else(|e| e.into_inner()).append(&batch);
    }

    /// Invoke a single listener now, without registry lookup
    pub fn execute_now(&self, invocable: &Invocable, data: &Value) -> Result<Value, ListenerError> {
        execute_now(invocable, data)
    }

    /// Run one listener and build its log entry, if it gets one
    fn run_listener(
        &self,
        event_name: &str,
        index: usize,
        declaration: &ListenerDeclaration,
        data: &Value,
    ) -> Option<LogEntry> {
        let descriptor = match normalize(declaration) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(
                    index,
                    kind = e.as_label(),
                    error = %e,
                    "listener normalization failed"
                );
                return Some(LogEntry::error(event_name, data.clone(), index, None, &e));
            }
        };

        let start = Instant::now();
        let outcome = if descriptor.is_async {
            let job = AsyncJob {
                event_name: event_name.to_string(),
                listener_index: index,
                invocable: descriptor.invocable,
                data: data.clone(),
            };
            isolate(|| self.executor.submit(job))
        } else {
            execute_now(&descriptor.invocable, data)
        };
        let elapsed_ms = millis_since(start);

        match outcome {
            Ok(result) => {
                tracing::debug!(
                    index,
                    is_async = descriptor.is_async,
                    elapsed_ms,
                    "listener completed"
                );
                descriptor.should_log.then(|| {
                    LogEntry::result(event_name, data.clone(), index, descriptor.is_async, result)
                })
            }
            Err(e) => {
                tracing::warn!(
                    index,
                    is_async = descriptor.is_async,
                    elapsed_ms,
                    code = e.code(),
                    kind = e.as_label(),
                    error = %e,
                    "listener failed"
                );
                Some(LogEntry::error(
                    event_name,
                    data.clone(),
                    index,
                    Some(descriptor.is_async),
                    &e,
                ))
            }
        }
    }

    // -- Log --

    pub fn log_path(&self) -> PathBuf {
        self.sink
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .path()
            .to_path_buf()
    }

    pub fn set_log_path(&self, path: impl Into<PathBuf>) {
        self.sink
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .set_path(path);
    }

    /// Append a batch directly, best-effort
    pub fn write_log(&self, batch: &[LogEntry]) {
        self.sink.lock().unwrap_or_else(|e| e.into_inner()).append(batch);
    }

    /// Full log text, or "" when nothing has been written
    pub fn log_contents(&self) -> String {
        self.sink.lock().unwrap_or_else(|e| e.into_inner()).read_all()
    }

    /// Parsed log batches
    pub fn log_batches(&self) -> Result<Vec<Vec<LogEntry>>, SinkError> {
        self.sink
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .read_batches()
    }

    pub fn clear_log(&self) {
        self.sink.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

fn millis_since(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
