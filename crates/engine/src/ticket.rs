// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tickets handed back for queued async jobs
//!
//! A ticket is the value logged as an async listener's result, so it should
//! let a reader find the job again in worker reports.

use crate::submit::AsyncJob;
use std::sync::atomic::{AtomicU64, Ordering};

/// Issues the ticket for a job at submission time
///
/// Any `Fn(&AsyncJob) -> String` closure is a ticket source.
pub trait TicketGen: Send + Sync {
    fn issue(&self, job: &AsyncJob) -> String;
}

impl<F> TicketGen for F
where
    F: Fn(&AsyncJob) -> String + Send + Sync,
{
    fn issue(&self, job: &AsyncJob) -> String {
        self(job)
    }
}

/// Opaque random tickets
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidTickets;

impl TicketGen for UuidTickets {
    fn issue(&self, _job: &AsyncJob) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Readable tickets of the form `<event>#<listener index>/<seq>`
///
/// `seq` counts submissions through this generator, starting at 1.
#[derive(Debug, Default)]
pub struct SequentialTickets {
    issued: AtomicU64,
}

impl SequentialTickets {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TicketGen for SequentialTickets {
    fn issue(&self, job: &AsyncJob) -> String {
        let seq = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}#{}/{}", job.event_name, job.listener_index, seq)
    }
}

#[cfg(test)]
#[path = "ticket_tests.rs"]
mod tests;
