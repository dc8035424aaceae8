// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Event dispatch engine: registry, trigger loop, async submission

mod dispatcher;
mod registry;
mod submit;
mod ticket;

pub use dispatcher::Dispatcher;
pub use registry::Registry;
pub use submit::{AsyncExecutor, AsyncJob, AsyncWorker, DeferredExecutor, JobReport, QueueExecutor};
pub use ticket::{SequentialTickets, TicketGen, UuidTickets};
