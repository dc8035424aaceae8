// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener normalization
//!
//! Rules, in order:
//! 1. A bundle contributes its handler and flags; a bare handler gets
//!    `is_async = false, should_log = false`.
//! 2. A type reference is left deferred when async, otherwise constructed
//!    and bound to its `handle` method.
//! 3. A direct handler is used as-is.
//!
//! Descriptors are recomputed on every trigger and never cached.

use crate::error::ListenerError;
use crate::listener::{Handler, HandlerRef, ListenerBundle, ListenerDeclaration, ListenerType};
use std::fmt;
use std::sync::Arc;

/// Invocation-ready form of a handler
#[derive(Clone)]
pub enum Invocable {
    /// Directly callable
    Bound(Handler),
    /// Type reference kept for the async path, never called synchronously
    Deferred(ListenerType),
}

impl Invocable {
    pub fn is_callable(&self) -> bool {
        matches!(self, Invocable::Bound(_))
    }

    /// True when both sides share the same bound callable
    pub fn same_binding(&self, other: &Invocable) -> bool {
        match (self, other) {
            (Invocable::Bound(a), Invocable::Bound(b)) => Arc::ptr_eq(a, b),
            (Invocable::Deferred(a), Invocable::Deferred(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Invocable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Invocable::Bound(_) => f.write_str("Bound(<fn>)"),
            Invocable::Deferred(t) => write!(f, "Deferred({})", t.name()),
        }
    }
}

/// Canonical listener: `{invocable, is_async, should_log}`
#[derive(Clone, Debug)]
pub struct ListenerDescriptor {
    pub invocable: Invocable,
    pub is_async: bool,
    pub should_log: bool,
}

/// Normalize a declaration into a descriptor
///
/// Fails only when a synchronous type reference cannot be constructed.
pub fn normalize(declaration: &ListenerDeclaration) -> Result<ListenerDescriptor, ListenerError> {
    let (handler, is_async, should_log) = match declaration {
        ListenerDeclaration::Bare(handler) => (handler, false, false),
        ListenerDeclaration::Bundle(bundle) => (
            &bundle.handler,
            bundle.is_async.unwrap_or(false),
            bundle.should_log.unwrap_or(false),
        ),
    };

    let invocable = match handler {
        HandlerRef::Direct(f) => Invocable::Bound(Arc::clone(f)),
        HandlerRef::Type(t) if is_async => Invocable::Deferred(*t),
        HandlerRef::Type(t) => Invocable::Bound(t.bind()?),
    };

    Ok(ListenerDescriptor {
        invocable,
        is_async,
        should_log,
    })
}

impl From<ListenerDescriptor> for ListenerDeclaration {
    fn from(descriptor: ListenerDescriptor) -> Self {
        let handler = match descriptor.invocable {
            Invocable::Bound(f) => HandlerRef::Direct(f),
            Invocable::Deferred(t) => HandlerRef::Type(t),
        };
        ListenerDeclaration::Bundle(
            ListenerBundle::new(handler)
                .with_async(descriptor.is_async)
                .with_log(descriptor.should_log),
        )
    }
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
