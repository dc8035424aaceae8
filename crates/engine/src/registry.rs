// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener registry: event name to ordered declarations

use eventbus_core::ListenerDeclaration;
use std::collections::HashMap;

/// Ordered listener declarations per event name
///
/// Insertion order is invocation order. The same listener may be registered
/// more than once and is then invoked once per registration.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    listeners: HashMap<String, Vec<ListenerDeclaration>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declaration for `event_name`
    pub fn add_listener(&mut self, event_name: &str, declaration: impl Into<ListenerDeclaration>) {
        self.listeners
            .entry(event_name.to_string())
            .or_default()
            .push(declaration.into());
    }

    /// Declarations for `event_name`, empty if the name is unknown
    pub fn listeners_for_event(&self, event_name: &str) -> &[ListenerDeclaration] {
        self.listeners
            .get(event_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_listeners_for_event(&self, event_name: &str) -> bool {
        !self.listeners_for_event(event_name).is_empty()
    }

    pub fn listener_count(&self, event_name: &str) -> usize {
        self.listeners_for_event(event_name).len()
    }

    /// Reset the sequence for `event_name` to empty
    pub fn clear_listeners_for_event(&mut self, event_name: &str) {
        self.listeners.insert(event_name.to_string(), Vec::new());
    }

    /// Event names with at least one listener, sorted
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .listeners
            .iter()
            .filter(|(_, decls)| !decls.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
