//! Initialization and Escape-key dismissal.

use tracing::{debug, info};

use crate::dom::node::NodeId;
use crate::engine::ToggleEngine;
use crate::event::listener::{Handler, ListenerTarget};

use super::schema::Trigger;

impl ToggleEngine {
    /// Scan the document and bind every trigger not bound yet.
    ///
    /// Default-active triggers are activated first, then each trigger's
    /// event is bound to toggle it, then the Escape listener is armed if any
    /// trigger asks for it. Already bound triggers are skipped entirely, so
    /// calling this again after inserting content binds only the new
    /// triggers and leaves existing state untouched. Returns the number of
    /// triggers bound by this call.
    pub fn init(&mut self) -> usize {
        let schema = &self.schema;
        let state = &self.state;
        let pending: Vec<(NodeId, Trigger)> = self
            .dom
            .query_all(|n| schema.is_trigger(n))
            .into_iter()
            .filter(|&id| !state.is_bound(id))
            .filter_map(|id| self.read_trigger(id).map(|t| (id, t)))
            .collect();

        for (id, trigger) in &pending {
            if trigger.default_active {
                debug!(node = ?id, "activating by default");
                self.transition(*id, trigger, true);
            }
        }

        for (id, trigger) in &pending {
            self.listeners
                .add(ListenerTarget::Node(*id), &trigger.event, Handler::ToggleSelf);
            self.state.mark_bound(*id);
        }

        let schema = &self.schema;
        if !self.dom.query_all(|n| schema.is_escape_trigger(n)).is_empty()
            && self.outside.arm_escape(&mut self.listeners)
        {
            debug!("escape listener registered");
        }

        info!(bound = pending.len(), "toggle triggers initialized");
        pending.len()
    }

    /// Deactivate every active Escape-dismiss trigger, in document order.
    pub(crate) fn dismiss_escape(&mut self) {
        let schema = &self.schema;
        for id in self.dom.query_all(|n| schema.is_escape_trigger(n)) {
            if self.state.is_active(id) {
                debug!(?id, "dismissing on escape");
                self.toggle(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::node::NodeData;
    use crate::dom::tree::Dom;
    use crate::engine::ToggleEngine;
    use crate::event::listener::{Handler, ListenerTarget};

    fn trigger(class: &str) -> NodeData {
        NodeData::new("button").with_attribute("data-toggle-class", class)
    }

    #[test]
    fn binds_each_trigger_on_its_event() {
        let mut dom = Dom::with_document();
        let root = dom.root().unwrap();
        let a = dom.insert_child(root, trigger("x"));
        let b = dom.insert_child(
            root,
            trigger("y").with_attribute("data-toggle-event", "mouseover"),
        );
        dom.insert_child(root, NodeData::new("div"));
        let mut engine = ToggleEngine::new(dom);

        assert_eq!(engine.init(), 2);
        let listeners = engine.listeners();
        assert!(listeners.contains(ListenerTarget::Node(a), "click", Handler::ToggleSelf));
        assert!(listeners.contains(ListenerTarget::Node(b), "mouseover", Handler::ToggleSelf));
        assert!(!listeners.contains(ListenerTarget::Node(b), "click", Handler::ToggleSelf));
    }

    #[test]
    fn default_active_applied_without_events() {
        let mut dom = Dom::with_document();
        let root = dom.root().unwrap();
        let button = dom.insert_child(
            root,
            trigger("open")
                .with_attribute("data-toggle-is-active", "")
                .with_attribute("data-toggle-target-all", ".panel")
                .with_attribute("aria-expanded", ""),
        );
        let panel = dom.insert_child(root, NodeData::new("div").with_class("panel"));
        let mut engine = ToggleEngine::new(dom);
        engine.init();

        assert!(engine.is_active(button));
        let data = engine.document().get(button).unwrap();
        assert!(data.has_class("open"));
        assert_eq!(data.attribute("aria-expanded"), Some("true"));
        assert!(engine.document().get(panel).unwrap().has_class("open"));
    }

    #[test]
    fn second_init_binds_nothing_and_keeps_state() {
        let mut dom = Dom::with_document();
        let root = dom.root().unwrap();
        let button = dom.insert_child(root, trigger("open"));
        let mut engine = ToggleEngine::new(dom);
        engine.init();
        engine.toggle(button);
        let before = engine.listeners().len();

        assert_eq!(engine.init(), 0);
        assert_eq!(engine.listeners().len(), before);
        assert!(engine.is_active(button));
    }

    #[test]
    fn init_picks_up_inserted_triggers() {
        let mut dom = Dom::with_document();
        let root = dom.root().unwrap();
        dom.insert_child(root, trigger("open"));
        let mut engine = ToggleEngine::new(dom);
        engine.init();

        let late = engine.document_mut().insert_child(root, trigger("late"));
        assert_eq!(engine.init(), 1);
        assert!(engine
            .listeners()
            .contains(ListenerTarget::Node(late), "click", Handler::ToggleSelf));
    }

    #[test]
    fn escape_listener_only_when_declared() {
        let mut dom = Dom::with_document();
        let root = dom.root().unwrap();
        dom.insert_child(root, trigger("open"));
        let mut engine = ToggleEngine::new(dom);
        engine.init();
        assert!(!engine
            .listeners()
            .contains(ListenerTarget::Document, "keyup", Handler::EscapeDismiss));

        engine
            .document_mut()
            .insert_child(root, trigger("menu").with_attribute("data-toggle-escape", ""));
        engine.init();
        assert!(engine
            .listeners()
            .contains(ListenerTarget::Document, "keyup", Handler::EscapeDismiss));
    }

    #[test]
    fn dismiss_escape_toggles_only_active_escape_triggers() {
        let mut dom = Dom::with_document();
        let root = dom.root().unwrap();
        let esc = |class: &str| trigger(class).with_attribute("data-toggle-escape", "");
        let a = dom.insert_child(root, esc("a"));
        let b = dom.insert_child(root, esc("b"));
        let plain = dom.insert_child(root, trigger("c"));
        let mut engine = ToggleEngine::new(dom);
        engine.init();
        engine.toggle(a);
        engine.toggle(plain);

        engine.dismiss_escape();
        assert!(!engine.is_active(a));
        assert!(!engine.is_active(b));
        assert!(engine.is_active(plain));
    }
}
