// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Synchronous listener invocation

use crate::error::ListenerError;
use crate::listener::HandlerFn;
use crate::normalize::Invocable;
use crate::output::Output;
use serde_json::Value;
use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

/// Invoke a single listener now, without registry lookup
///
/// Fails with [`ListenerError::NotCallable`] for deferred type references.
pub fn execute_now(invocable: &Invocable, data: &Value) -> Result<Value, ListenerError> {
    match invocable {
        Invocable::Bound(handler) => invoke_captured(handler.as_ref(), data),
        Invocable::Deferred(_) => Err(ListenerError::NotCallable),
    }
}

/// Call a handler with a private output buffer and panic isolation
///
/// Whatever the handler writes is discarded once the call returns. A panic is
/// reported as [`ListenerError::Panicked`].
pub fn invoke_captured(handler: &HandlerFn, data: &Value) -> Result<Value, ListenerError> {
    let mut output = Output::new();
    let outcome = isolate(|| handler(data, &mut output));

    if !output.is_empty() {
        tracing::trace!(discarded_bytes = output.len(), "discarded listener output");
    }

    outcome
}

/// Run listener-supplied code, turning a panic into [`ListenerError::Panicked`]
///
/// While `f` runs, panics on this thread are reported through tracing instead
/// of the process panic hook, so nothing is printed to the host's stderr.
pub fn isolate<T>(f: impl FnOnce() -> Result<T, ListenerError>) -> Result<T, ListenerError> {
    install_quiet_hook();
    let _quiet = QuietGuard::enter();

    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(ListenerError::Panicked {
            message: panic_message(payload.as_ref()),
        }),
    }
}

thread_local! {
    static QUIET_DEPTH: Cell<usize> = const { Cell::new(0) };
}

static QUIET_HOOK: Once = Once::new();

/// Chain a hook in front of the current one that silences isolated panics
fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if QUIET_DEPTH.with(Cell::get) > 0 {
                let location = info
                    .location()
                    .map(|l| format!("{}:{}", l.file(), l.line()))
                    .unwrap_or_default();
                tracing::debug!(
                    %location,
                    message = %panic_message(info.payload()),
                    "listener panicked"
                );
            } else {
                previous(info);
            }
        }));
    });
}

struct QuietGuard;

impl QuietGuard {
    fn enter() -> Self {
        QUIET_DEPTH.with(|d| d.set(d.get() + 1));
        QuietGuard
    }
}

impl Drop for QuietGuard {
    fn drop(&mut self) {
        QUIET_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "invoke_tests.rs"]
mod tests;
