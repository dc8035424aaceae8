// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener capability and declarations
//!
//! A listener is declared either by value ([`HandlerRef::Direct`], a shared
//! closure) or by type ([`HandlerRef::Type`], a type implementing
//! [`EventListener`]). Declarations can be bare or bundled with execution
//! flags; [`crate::normalize`] turns either form into a descriptor.

use crate::error::ListenerError;
use crate::invoke::isolate;
use crate::output::Output;
use serde_json::Value;
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// Signature of a directly invocable listener
pub type HandlerFn = dyn Fn(&Value, &mut Output) -> Result<Value, ListenerError> + Send + Sync;

/// Shared, bound listener callable
pub type Handler = Arc<HandlerFn>;

/// Listener referenced by type
///
/// The dispatcher constructs the type with [`EventListener::construct`] when
/// it needs an instance, so implementors must not require arguments.
pub trait EventListener: Send + Sync + 'static {
    /// Zero-argument construction step
    fn construct() -> Result<Self, ListenerError>
    where
        Self: Sized;

    /// Handle one event payload
    fn handle(&self, data: &Value, out: &mut Output) -> Result<Value, ListenerError>;
}

/// Reference to a type implementing [`EventListener`]
#[derive(Clone, Copy)]
pub struct ListenerType {
    name: &'static str,
    type_id: TypeId,
    construct: fn() -> Result<Box<dyn EventListener>, ListenerError>,
}

impl ListenerType {
    pub fn of<T: EventListener>() -> Self {
        Self {
            name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            construct: construct_boxed::<T>,
        }
    }

    /// Fully qualified type name, used in logs and construction errors
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the construction step
    ///
    /// Failures, panics included, are always reported as
    /// [`ListenerError::Construction`].
    pub fn instantiate(&self) -> Result<Box<dyn EventListener>, ListenerError> {
        isolate(self.construct).map_err(|e| match e {
            ListenerError::Construction { .. } => e,
            other => ListenerError::construction(self.name, other.to_string()),
        })
    }

    /// Construct an instance and bind its `handle` method
    pub fn bind(&self) -> Result<Handler, ListenerError> {
        let instance: Arc<dyn EventListener> = Arc::from(self.instantiate()?);
        Ok(Arc::new(move |data: &Value, out: &mut Output| {
            instance.handle(data, out)
        }))
    }
}

fn construct_boxed<T: EventListener>() -> Result<Box<dyn EventListener>, ListenerError> {
    Ok(Box::new(T::construct()?))
}

impl PartialEq for ListenerType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ListenerType {}

impl fmt::Debug for ListenerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ListenerType").field(&self.name).finish()
    }
}

/// Handler half of a declaration: a bound callable or a type reference
#[derive(Clone)]
pub enum HandlerRef {
    Direct(Handler),
    Type(ListenerType),
}

impl HandlerRef {
    pub fn direct<F>(f: F) -> Self
    where
        F: Fn(&Value, &mut Output) -> Result<Value, ListenerError> + Send + Sync + 'static,
    {
        Self::Direct(Arc::new(f))
    }

    pub fn of_type<T: EventListener>() -> Self {
        Self::Type(ListenerType::of::<T>())
    }
}

impl fmt::Debug for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerRef::Direct(_) => f.write_str("Direct(<fn>)"),
            HandlerRef::Type(t) => write!(f, "Type({})", t.name()),
        }
    }
}

/// Handler with execution flags
///
/// Unset flags fall back to `false` during normalization.
#[derive(Clone, Debug)]
pub struct ListenerBundle {
    pub handler: HandlerRef,
    pub is_async: Option<bool>,
    pub should_log: Option<bool>,
}

impl ListenerBundle {
    pub fn new(handler: HandlerRef) -> Self {
        Self {
            handler,
            is_async: None,
            should_log: None,
        }
    }

    pub fn with_async(mut self, is_async: bool) -> Self {
        self.is_async = Some(is_async);
        self
    }

    pub fn with_log(mut self, should_log: bool) -> Self {
        self.should_log = Some(should_log);
        self
    }
}

/// What a caller registers against an event name
#[derive(Clone, Debug)]
pub enum ListenerDeclaration {
    Bare(HandlerRef),
    Bundle(ListenerBundle),
}

impl ListenerDeclaration {
    /// Bare closure listener
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&Value, &mut Output) -> Result<Value, ListenerError> + Send + Sync + 'static,
    {
        Self::Bare(HandlerRef::direct(f))
    }

    /// Bare listener referenced by type
    pub fn of_type<T: EventListener>() -> Self {
        Self::Bare(HandlerRef::of_type::<T>())
    }

    pub fn handler(&self) -> &HandlerRef {
        match self {
            ListenerDeclaration::Bare(handler) => handler,
            ListenerDeclaration::Bundle(bundle) => &bundle.handler,
        }
    }
}

impl From<HandlerRef> for ListenerDeclaration {
    fn from(handler: HandlerRef) -> Self {
        Self::Bare(handler)
    }
}

impl From<ListenerBundle> for ListenerDeclaration {
    fn from(bundle: ListenerBundle) -> Self {
        Self::Bundle(bundle)
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
