//! Outside-interaction coordination.
//!
//! [`OutsideCoordinator`] owns the document-level listeners: one shared
//! [`Handler::OutsideDismiss`] registration per event name, backed by the set
//! of active outside triggers subscribed to that name, plus the single Escape
//! `keyup` registration.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::dom::node::NodeId;
use crate::engine::ToggleEngine;
use crate::event::input::KEY_UP;
use crate::event::listener::{Handler, ListenerRegistry, ListenerTarget};

use super::schema::Trigger;

/// When the shared document listener for an event name is removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListenerPolicy {
    /// Removed when the last subscriber for the event name deactivates.
    #[default]
    RefCounted,
    /// Removed whenever any subscriber deactivates, even if others remain
    /// active. Reproduces plain add/remove listener pairing.
    Legacy,
}

/// Owner of the document-level outside and Escape listeners.
#[derive(Debug, Default, Clone)]
pub struct OutsideCoordinator {
    policy: ListenerPolicy,
    subscribers: HashMap<String, HashSet<NodeId>>,
}

impl OutsideCoordinator {
    pub fn new(policy: ListenerPolicy) -> Self {
        Self {
            policy,
            subscribers: HashMap::new(),
        }
    }

    pub fn policy(&self) -> ListenerPolicy {
        self.policy
    }

    /// Subscribe `trigger` for `event`, registering the shared document
    /// listener if needed. Returns `true` if the registration was added.
    pub fn subscribe(
        &mut self,
        listeners: &mut ListenerRegistry,
        event: &str,
        trigger: NodeId,
    ) -> bool {
        self.subscribers
            .entry(event.to_owned())
            .or_default()
            .insert(trigger);
        listeners.add(ListenerTarget::Document, event, Handler::OutsideDismiss)
    }

    /// Unsubscribe `trigger` from `event`. Returns `true` if the shared
    /// document listener was removed.
    pub fn unsubscribe(
        &mut self,
        listeners: &mut ListenerRegistry,
        event: &str,
        trigger: NodeId,
    ) -> bool {
        let now_empty = match self.subscribers.get_mut(event) {
            Some(set) => {
                set.remove(&trigger);
                set.is_empty()
            }
            None => true,
        };
        if now_empty {
            self.subscribers.remove(event);
        }

        let drop_listener = match self.policy {
            ListenerPolicy::RefCounted => now_empty,
            ListenerPolicy::Legacy => true,
        };
        drop_listener && listeners.remove(ListenerTarget::Document, event, Handler::OutsideDismiss)
    }

    /// Drop `trigger` from every event name it is subscribed to, as if it had
    /// deactivated.
    pub fn forget(&mut self, listeners: &mut ListenerRegistry, trigger: NodeId) {
        let events: Vec<String> = self
            .subscribers
            .iter()
            .filter(|(_, set)| set.contains(&trigger))
            .map(|(event, _)| event.clone())
            .collect();
        for event in events {
            self.unsubscribe(listeners, &event, trigger);
        }
    }

    /// Register the document Escape listener. Returns `true` if newly added.
    pub fn arm_escape(&mut self, listeners: &mut ListenerRegistry) -> bool {
        listeners.add(ListenerTarget::Document, KEY_UP, Handler::EscapeDismiss)
    }

    /// Triggers currently subscribed for `event`.
    pub fn subscribers(&self, event: &str) -> usize {
        self.subscribers.get(event).map_or(0, HashSet::len)
    }

    /// Whether `trigger` is subscribed for `event`.
    pub fn is_subscribed(&self, event: &str, trigger: NodeId) -> bool {
        self.subscribers
            .get(event)
            .is_some_and(|set| set.contains(&trigger))
    }
}

// ---------------------------------------------------------------------------
// Engine integration
// ---------------------------------------------------------------------------

impl ToggleEngine {
    /// Subscribe or unsubscribe `node` according to its new active flag.
    /// No-op for triggers without the outside attribute.
    pub(crate) fn sync_outside_listener(&mut self, node: NodeId, trigger: &Trigger, active: bool) {
        if !trigger.outside {
            return;
        }
        if active {
            if self.outside.subscribe(&mut self.listeners, &trigger.event, node) {
                debug!(event = %trigger.event, "outside listener registered");
            }
        } else if self.outside.unsubscribe(&mut self.listeners, &trigger.event, node) {
            debug!(event = %trigger.event, "outside listener removed");
        }
    }

    /// Shared document handler for outside interactions originating at
    /// `origin`.
    ///
    /// Does nothing when `origin` sits inside a protected subtree. Otherwise
    /// deactivates every active outside trigger that does not contain
    /// `origin`, then re-subscribes the active outside triggers that do.
    pub(crate) fn dismiss_outside(&mut self, origin: NodeId) {
        let schema = &self.schema;
        if self
            .dom
            .closest_by(origin, |n| schema.is_protected(n))
            .is_some()
        {
            trace!("outside interaction inside protected subtree");
            return;
        }

        let candidates = self.dom.query_all(|n| schema.is_outside_trigger(n));
        let mut rearm = Vec::new();
        for id in candidates {
            if !self.state.is_active(id) {
                continue;
            }
            if self.dom.contains_node(id, origin) {
                rearm.push(id);
            } else {
                debug!(?id, "dismissing on outside interaction");
                self.toggle(id);
            }
        }

        for id in rearm {
            if !self.state.is_active(id) {
                continue;
            }
            if let Some(trigger) = self.read_trigger(id) {
                self.outside
                    .subscribe(&mut self.listeners, &trigger.event, id);
            }
        }
    }
}
