//! Shared fixtures for dispatcher specs

#![allow(dead_code)]

pub use eventbus_core::{
    DispatcherConfig, EchoListener, FailingConstruction, FakeListener, HandlerRef,
    ListenerBundle, ListenerDeclaration, LogEntry, Output, PanickingConstruction,
};
pub use eventbus_engine::{Dispatcher, QueueExecutor, SequentialTickets};
pub use serde_json::{json, Value};

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A dispatcher whose log lives in its own temporary directory
pub struct Scene {
    dir: TempDir,
    pub dispatcher: Dispatcher,
}

impl Scene {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let dispatcher = Dispatcher::from_config(&DispatcherConfig {
            log_path: dir.path().join("event.log"),
        });
        Self { dir, dispatcher }
    }

    /// Scene whose async listeners go to a sequential-ticket queue
    pub fn queued() -> (Self, eventbus_engine::AsyncWorker) {
        let scene = Self::new();
        let (executor, worker) = QueueExecutor::with_tickets(SequentialTickets::new());
        let Scene { dir, dispatcher } = scene;
        let scene = Self {
            dir,
            dispatcher: dispatcher.with_executor(executor),
        };
        (scene, worker)
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn on(&self, event: &str, declaration: impl Into<ListenerDeclaration>) -> &Self {
        self.dispatcher.add_listener(event, declaration);
        self
    }

    pub fn trigger(&self, event: &str, data: Value) -> Log {
        self.dispatcher.trigger(event, &data);
        self.log()
    }

    pub fn log(&self) -> Log {
        Log {
            text: self.dispatcher.log_contents(),
            batches: self.dispatcher.log_batches().unwrap(),
        }
    }
}

/// Snapshot of the log file
pub struct Log {
    pub text: String,
    pub batches: Vec<Vec<LogEntry>>,
}

impl Log {
    pub fn is_empty(&self) -> &Self {
        assert_eq!(self.text, "", "expected empty log, got:\n{}", self.text);
        self
    }

    pub fn has(&self, fragment: &str) -> &Self {
        assert!(
            self.text.contains(fragment),
            "log does not contain {fragment:?}:\n{}",
            self.text
        );
        self
    }

    pub fn lacks(&self, fragment: &str) -> &Self {
        assert!(
            !self.text.contains(fragment),
            "log unexpectedly contains {fragment:?}:\n{}",
            self.text
        );
        self
    }

    pub fn batch_count(&self, n: usize) -> &Self {
        assert_eq!(self.batches.len(), n, "log:\n{}", self.text);
        self
    }

    pub fn last(&self) -> &[LogEntry] {
        self.batches.last().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Logged bundle around a handler
pub fn logged(handler: HandlerRef) -> ListenerBundle {
    ListenerBundle::new(handler).with_log(true)
}
