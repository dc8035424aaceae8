// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake listeners for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use crate::error::ListenerError;
use crate::listener::{EventListener, HandlerRef};
use crate::output::Output;
use serde_json::Value;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Recorded listener invocation
#[derive(Debug, Clone, PartialEq)]
pub struct ListenerCall {
    pub data: Value,
}

#[derive(Clone)]
enum Response {
    Return(Value),
    Fail { code: i64, message: String },
    Panic(String),
}

/// Fake listener that records calls and replies with a canned response
///
/// Every call also writes a line of noise to its output buffer so tests can
/// check that listener output never leaks.
#[derive(Clone)]
pub struct FakeListener {
    calls: Arc<Mutex<Vec<ListenerCall>>>,
    response: Response,
}

impl FakeListener {
    pub fn returning(value: Value) -> Self {
        Self::with_response(Response::Return(value))
    }

    pub fn failing(code: i64, message: impl Into<String>) -> Self {
        Self::with_response(Response::Fail {
            code,
            message: message.into(),
        })
    }

    pub fn panicking(message: impl Into<String>) -> Self {
        Self::with_response(Response::Panic(message.into()))
    }

    fn with_response(response: Response) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            response,
        }
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ListenerCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Handler sharing this fake's call record
    pub fn handler(&self) -> HandlerRef {
        let fake = self.clone();
        HandlerRef::direct(move |data: &Value, out: &mut Output| fake.respond(data, out))
    }

    fn respond(&self, data: &Value, out: &mut Output) -> Result<Value, ListenerError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(ListenerCall { data: data.clone() });
        let _ = writeln!(out, "fake listener called with {data}");

        match &self.response {
            Response::Return(value) => Ok(value.clone()),
            Response::Fail { code, message } => Err(ListenerError::handler(*code, message.clone())),
            Response::Panic(message) => std::panic::panic_any(message.clone()),
        }
    }
}

/// Listener type that echoes its payload
#[derive(Debug, Default)]
pub struct EchoListener;

impl EchoListener {
    pub fn render(data: &Value) -> String {
        format!("EchoListener->handle data:{data}")
    }
}

impl EventListener for EchoListener {
    fn construct() -> Result<Self, ListenerError> {
        Ok(Self)
    }

    fn handle(&self, data: &Value, out: &mut Output) -> Result<Value, ListenerError> {
        let _ = write!(out, "echo");
        Ok(Value::String(Self::render(data)))
    }
}

/// Listener type whose construction step always fails
#[derive(Debug)]
pub struct FailingConstruction;

impl EventListener for FailingConstruction {
    fn construct() -> Result<Self, ListenerError> {
        Err(ListenerError::handler(1, "construction refused"))
    }

    fn handle(&self, _data: &Value, _out: &mut Output) -> Result<Value, ListenerError> {
        Ok(Value::Null)
    }
}

/// Listener type whose construction step panics
#[derive(Debug)]
pub struct PanickingConstruction;

impl EventListener for PanickingConstruction {
    fn construct() -> Result<Self, ListenerError> {
        std::panic::panic_any("constructor blew up")
    }

    fn handle(&self, _data: &Value, _out: &mut Output) -> Result<Value, ListenerError> {
        Ok(Value::Null)
    }
}
