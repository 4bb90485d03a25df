//! Listener registry: which handler runs for which (target, event type).
//!
//! Registration follows platform `addEventListener` semantics: adding an
//! identical (target, event type, handler) triple twice is a no-op, and
//! removing one that is not registered does nothing.

use std::collections::HashMap;

use crate::dom::node::NodeId;

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// The document itself (last stop of every bubbling event).
    Document,
    /// A single element.
    Node(NodeId),
}

/// The behaviour a listener invokes when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    /// Toggle the element the listener is attached to, suppressing the
    /// default action.
    ToggleSelf,
    /// Deactivate the trigger that owns the trigger-off element the listener
    /// is attached to.
    TriggerOff,
    /// Document-level sweep deactivating dismiss-on-outside triggers.
    OutsideDismiss,
    /// Document-level Escape handler deactivating escape-dismiss triggers.
    EscapeDismiss,
    /// One-shot document handler that runs initialization on load.
    Initialize,
}

/// All registered listeners, keyed by target then event type.
#[derive(Debug, Default, Clone)]
pub struct ListenerRegistry {
    map: HashMap<ListenerTarget, HashMap<String, Vec<Handler>>>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler`. Returns `false` if it was already registered.
    pub fn add(&mut self, target: ListenerTarget, event_type: &str, handler: Handler) -> bool {
        let handlers = self
            .map
            .entry(target)
            .or_default()
            .entry(event_type.to_owned())
            .or_default();
        if handlers.contains(&handler) {
            return false;
        }
        handlers.push(handler);
        true
    }

    /// Unregister `handler`. Returns `true` if it was registered.
    pub fn remove(&mut self, target: ListenerTarget, event_type: &str, handler: Handler) -> bool {
        let Some(events) = self.map.get_mut(&target) else {
            return false;
        };
        let Some(handlers) = events.get_mut(event_type) else {
            return false;
        };
        let Some(pos) = handlers.iter().position(|&h| h == handler) else {
            return false;
        };
        handlers.remove(pos);
        if handlers.is_empty() {
            events.remove(event_type);
        }
        if events.is_empty() {
            self.map.remove(&target);
        }
        true
    }

    /// Remove every listener attached to `target`. Returns how many were removed.
    pub fn remove_target(&mut self, target: ListenerTarget) -> usize {
        self.map
            .remove(&target)
            .map(|events| events.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    /// Snapshot of the handlers for `target` and `event_type`, in
    /// registration order.
    pub fn handlers(&self, target: ListenerTarget, event_type: &str) -> Vec<Handler> {
        self.map
            .get(&target)
            .and_then(|events| events.get(event_type))
            .cloned()
            .unwrap_or_default()
    }

    /// Whether `handler` is registered for `target` and `event_type`.
    pub fn contains(&self, target: ListenerTarget, event_type: &str, handler: Handler) -> bool {
        self.map
            .get(&target)
            .and_then(|events| events.get(event_type))
            .is_some_and(|handlers| handlers.contains(&handler))
    }

    /// Number of listeners attached to `target`, across all event types.
    pub fn count_for(&self, target: ListenerTarget) -> usize {
        self.map
            .get(&target)
            .map(|events| events.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    /// Total number of registered listeners.
    pub fn len(&self) -> usize {
        self.map
            .values()
            .flat_map(|events| events.values())
            .map(Vec::len)
            .sum()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Element ids that currently have at least one listener.
    pub fn node_targets(&self) -> Vec<NodeId> {
        self.map
            .keys()
            .filter_map(|target| match target {
                ListenerTarget::Node(id) => Some(*id),
                ListenerTarget::Document => None,
            })
            .collect()
    }
}
