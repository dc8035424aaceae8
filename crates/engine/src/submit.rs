// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Async listener submission
//!
//! Listeners declared with `is_async` are not run by `trigger`. They are
//! handed to an [`AsyncExecutor`] instead, and whatever it returns is logged
//! as the listener's result.
//!
//! - [`DeferredExecutor`] never runs the listener and returns `""`.
//! - [`QueueExecutor`] queues the job for an [`AsyncWorker`] and returns a
//!   ticket.

use crate::ticket::{TicketGen, UuidTickets};
use eventbus_core::{invoke_captured, Invocable, ListenerError};
use serde_json::Value;
use tokio::sync::mpsc;

/// Work handed to an async executor
#[derive(Debug, Clone)]
pub struct AsyncJob {
    pub event_name: String,
    pub listener_index: usize,
    pub invocable: Invocable,
    pub data: Value,
}

/// Task-submission contract for async listeners
pub trait AsyncExecutor: Send + Sync {
    /// Accept a job; the returned value is logged as the listener's result
    fn submit(&self, job: AsyncJob) -> Result<Value, ListenerError>;
}

/// Executor that accepts jobs without running them
#[derive(Clone, Debug, Default)]
pub struct DeferredExecutor;

impl AsyncExecutor for DeferredExecutor {
    fn submit(&self, job: AsyncJob) -> Result<Value, ListenerError> {
        tracing::debug!(
            event = %job.event_name,
            index = job.listener_index,
            "async listener deferred"
        );
        Ok(Value::String(String::new()))
    }
}

struct QueuedJob {
    ticket: String,
    job: AsyncJob,
}

/// Executor that queues jobs for an [`AsyncWorker`]
pub struct QueueExecutor {
    sender: mpsc::UnboundedSender<QueuedJob>,
    tickets: Box<dyn TicketGen>,
}

impl QueueExecutor {
    /// Create a connected executor/worker pair with UUID tickets
    pub fn channel() -> (Self, AsyncWorker) {
        Self::with_tickets(UuidTickets)
    }

    pub fn with_tickets(tickets: impl TicketGen + 'static) -> (Self, AsyncWorker) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let executor = Self {
            sender,
            tickets: Box::new(tickets),
        };
        (executor, AsyncWorker { receiver })
    }
}

impl AsyncExecutor for QueueExecutor {
    fn submit(&self, job: AsyncJob) -> Result<Value, ListenerError> {
        let ticket = self.tickets.issue(&job);
        self.sender
            .send(QueuedJob {
                ticket: ticket.clone(),
                job,
            })
            .map_err(|_| ListenerError::QueueClosed)?;
        tracing::debug!(ticket = %ticket, "async job queued");
        Ok(Value::String(ticket))
    }
}

/// Outcome of one job processed by the worker
#[derive(Debug, Clone, PartialEq)]
pub struct JobReport {
    pub ticket: String,
    pub event_name: String,
    pub listener_index: usize,
    pub outcome: Result<Value, ListenerError>,
}

/// Drains the job queue of a [`QueueExecutor`]
pub struct AsyncWorker {
    receiver: mpsc::UnboundedReceiver<QueuedJob>,
}

impl AsyncWorker {
    /// Process jobs until every executor handle is dropped
    ///
    /// Returns the number of jobs processed.
    pub async fn run(mut self) -> usize {
        let mut processed = 0;
        while let Some(queued) = self.receiver.recv().await {
            process(queued);
            processed += 1;
        }
        tracing::info!(processed, "async worker stopped");
        processed
    }

    /// Process whatever is queued right now without waiting
    pub fn run_pending(&mut self) -> Vec<JobReport> {
        let mut reports = Vec::new();
        while let Ok(queued) = self.receiver.try_recv() {
            reports.push(process(queued));
        }
        reports
    }
}

fn process(queued: QueuedJob) -> JobReport {
    let QueuedJob { ticket, job } = queued;
    let span = tracing::info_span!(
        "async_job",
        ticket = %ticket,
        event = %job.event_name,
        index = job.listener_index
    );
    let _guard = span.enter();

    // Deferred type references are constructed here, at execution time.
    let outcome = match &job.invocable {
        Invocable::Bound(handler) => invoke_captured(handler.as_ref(), &job.data),
        Invocable::Deferred(listener) => listener
            .bind()
            .and_then(|handler| invoke_captured(handler.as_ref(), &job.data)),
    };

    match &outcome {
        Ok(_) => tracing::info!("async job completed"),
        Err(e) => tracing::warn!(
            code = e.code(),
            kind = e.as_label(),
            error = %e,
            "async job failed"
        ),
    }

    JobReport {
        ticket,
        event_name: job.event_name,
        listener_index: job.listener_index,
        outcome,
    }
}

#[cfg(test)]
#[path = "submit_tests.rs"]
mod tests;
