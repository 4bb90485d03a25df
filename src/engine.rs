//! Engine: configuration, event dispatch, and teardown.
//!
//! [`ToggleEngine`] owns the document, the side table, the listener registry
//! and the outside coordinator. Construction registers a one-shot
//! `DOMContentLoaded` listener that runs [`init`](ToggleEngine::init), so a
//! host only has to dispatch events into it.

use tracing::{debug, trace};

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::event::dispatch::propagation_path;
use crate::event::input::{Event, Key, CLICK, CONTENT_LOADED};
use crate::event::listener::{Handler, ListenerRegistry, ListenerTarget};
use crate::markup::{parse_markup, MarkupError};
use crate::toggle::outside::{ListenerPolicy, OutsideCoordinator};
use crate::toggle::schema::{AttributeSchema, DEFAULT_PREFIX};
use crate::toggle::state::SideTable;

// ---------------------------------------------------------------------------
// ToggleConfig
// ---------------------------------------------------------------------------

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleConfig {
    /// Attribute prefix; attributes are named `data-{prefix}{suffix}`.
    pub prefix: String,
    /// Event a trigger listens for when it has no event attribute.
    pub default_event: String,
    /// Removal policy for shared outside listeners.
    pub listener_policy: ListenerPolicy,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_owned(),
            default_event: "click".to_owned(),
            listener_policy: ListenerPolicy::default(),
        }
    }
}

impl ToggleConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the attribute prefix (builder).
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the default event name (builder). An empty name keeps `click`.
    pub fn with_default_event(mut self, event: impl Into<String>) -> Self {
        let event = event.into();
        if !event.trim().is_empty() {
            self.default_event = event.trim().to_owned();
        }
        self
    }

    /// Set the outside listener policy (builder).
    pub fn with_listener_policy(mut self, policy: ListenerPolicy) -> Self {
        self.listener_policy = policy;
        self
    }
}

// ---------------------------------------------------------------------------
// ToggleEngine
// ---------------------------------------------------------------------------

/// Attribute-driven toggle engine over a [`Dom`].
#[derive(Debug, Clone)]
pub struct ToggleEngine {
    pub(crate) dom: Dom,
    pub(crate) config: ToggleConfig,
    pub(crate) schema: AttributeSchema,
    pub(crate) state: SideTable,
    pub(crate) listeners: ListenerRegistry,
    pub(crate) outside: OutsideCoordinator,
}

impl ToggleEngine {
    /// Create an engine with the default configuration.
    ///
    /// Nothing is bound until `init` runs, either directly or through
    /// [`content_loaded`](Self::content_loaded).
    pub fn new(dom: Dom) -> Self {
        Self::with_config(dom, ToggleConfig::default())
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(dom: Dom, config: ToggleConfig) -> Self {
        let mut listeners = ListenerRegistry::new();
        listeners.add(ListenerTarget::Document, CONTENT_LOADED, Handler::Initialize);
        Self {
            dom,
            schema: AttributeSchema::new(&config.prefix),
            outside: OutsideCoordinator::new(config.listener_policy),
            config,
            state: SideTable::new(),
            listeners,
        }
    }

    /// Parse `source` and fire `DOMContentLoaded`, leaving every trigger
    /// bound.
    pub fn from_markup(source: &str) -> Result<Self, MarkupError> {
        Self::from_markup_with_config(source, ToggleConfig::default())
    }

    /// [`from_markup`](Self::from_markup) with an explicit configuration.
    pub fn from_markup_with_config(source: &str, config: ToggleConfig) -> Result<Self, MarkupError> {
        let dom = parse_markup(source)?;
        let mut engine = Self::with_config(dom, config);
        engine.content_loaded();
        Ok(engine)
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn document(&self) -> &Dom {
        &self.dom
    }

    /// Mutable access to the document, for inserting content before
    /// calling `init` again. Use [`remove_element`](Self::remove_element)
    /// rather than removing nodes directly.
    pub fn document_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    pub fn config(&self) -> &ToggleConfig {
        &self.config
    }

    pub fn schema(&self) -> &AttributeSchema {
        &self.schema
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Total number of registered listeners, document listeners included.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Active flag of the trigger at `node`.
    pub fn is_active(&self, node: NodeId) -> bool {
        self.state.is_active(node)
    }

    /// Number of outside triggers subscribed for `event`.
    pub fn outside_subscribers(&self, event: &str) -> usize {
        self.outside.subscribers(event)
    }

    /// Consume the engine, returning the document.
    pub fn into_document(self) -> Dom {
        self.dom
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    /// Dispatch `event` along its bubble path and return it, with
    /// `default_prevented` reflecting what the listeners did.
    ///
    /// Listener lists are read when the event reaches each stop, so a
    /// listener registered on a later stop by an earlier one still fires.
    /// A listener removed before its turn does not.
    pub fn dispatch(&mut self, event: Event) -> Event {
        let path = propagation_path(&self.dom, event.target);
        self.deliver(path, event)
    }

    /// Dispatch a `click` on `target`.
    pub fn click(&mut self, target: NodeId) -> Event {
        self.dispatch(Event::click(target))
    }

    /// Dispatch a `keyup` of `key` on `target`.
    pub fn key_up(&mut self, target: NodeId, key: Key) -> Event {
        self.dispatch(Event::key_up(target, key))
    }

    /// Fire `DOMContentLoaded` at the document.
    pub fn content_loaded(&mut self) -> Event {
        let root = self.dom.root().unwrap_or_default();
        self.deliver(vec![ListenerTarget::Document], Event::content_loaded(root))
    }

    fn deliver(&mut self, path: Vec<ListenerTarget>, mut event: Event) -> Event {
        trace!(event = %event.event_type, stops = path.len(), "dispatching");
        for stop in path {
            if let ListenerTarget::Node(id) = stop {
                if !self.dom.contains(id) {
                    continue;
                }
            }
            for handler in self.listeners.handlers(stop, &event.event_type) {
                if self.listeners.contains(stop, &event.event_type, handler) {
                    self.run_handler(handler, stop, &mut event);
                }
            }
        }
        event
    }

    fn run_handler(&mut self, handler: Handler, current: ListenerTarget, event: &mut Event) {
        match (handler, current) {
            (Handler::ToggleSelf, ListenerTarget::Node(id)) => {
                event.prevent_default();
                self.toggle(id);
            }
            (Handler::TriggerOff, ListenerTarget::Node(id)) => self.trigger_off_clicked(id),
            (Handler::OutsideDismiss, ListenerTarget::Document) => {
                self.dismiss_outside(event.target)
            }
            (Handler::EscapeDismiss, ListenerTarget::Document) => {
                if event.is_escape() {
                    self.dismiss_escape();
                }
            }
            (Handler::Initialize, ListenerTarget::Document) => {
                self.listeners
                    .remove(ListenerTarget::Document, CONTENT_LOADED, Handler::Initialize);
                self.init();
            }
            (handler, target) => {
                trace!(?handler, ?target, "handler not applicable to target");
            }
        }
    }

    // ── Teardown ─────────────────────────────────────────────────────

    /// Remove `node` and its subtree from the document and drop every piece
    /// of engine state attached to the removed elements. Returns the number
    /// of elements removed.
    pub fn remove_element(&mut self, node: NodeId) -> usize {
        let removed = self.dom.remove(node);
        for &id in &removed {
            self.forget(id);
        }
        debug!(count = removed.len(), "elements removed");
        removed.len()
    }

    /// Drop engine state for elements no longer in the document, e.g. after
    /// removing nodes through [`document_mut`](Self::document_mut). Returns
    /// the number of stale ids purged.
    pub fn prune(&mut self) -> usize {
        let mut stale: Vec<NodeId> = self.state.tracked();
        stale.extend(self.listeners.node_targets());
        stale.retain(|&id| !self.dom.contains(id));
        stale.sort();
        stale.dedup();
        for &id in &stale {
            self.forget(id);
        }
        if !stale.is_empty() {
            debug!(count = stale.len(), "stale entries pruned");
        }
        stale.len()
    }

    fn forget(&mut self, id: NodeId) {
        self.state.forget(id);
        self.listeners.remove_target(ListenerTarget::Node(id));
        self.outside.forget(&mut self.listeners, id);
        for control in self.state.release_owned_by(id) {
            self.listeners
                .remove(ListenerTarget::Node(control), CLICK, Handler::TriggerOff);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::NodeData;

    fn nav_scenario() -> (ToggleEngine, NodeId, NodeId) {
        let mut dom = Dom::with_document();
        let root = dom.root().unwrap();
        let nav = dom.insert_child(root, NodeData::new("nav").with_class("menu"));
        let button = dom.insert_child(
            nav,
            NodeData::new("button")
                .with_attribute("data-toggle-class", "open")
                .with_attribute("data-toggle-target-parent", ".menu"),
        );
        (ToggleEngine::new(dom), nav, button)
    }

    // ── Config ───────────────────────────────────────────────────────

    #[test]
    fn config_defaults() {
        let config = ToggleConfig::new();
        assert_eq!(config.prefix, "toggle-");
        assert_eq!(config.default_event, "click");
        assert_eq!(config.listener_policy, ListenerPolicy::RefCounted);
    }

    #[test]
    fn config_builders() {
        let config = ToggleConfig::new()
            .with_prefix("ui")
            .with_default_event(" pointerdown ")
            .with_listener_policy(ListenerPolicy::Legacy);
        assert_eq!(config.default_event, "pointerdown");
        let engine = ToggleEngine::with_config(Dom::with_document(), config);
        assert_eq!(engine.schema().class, "data-ui-class");
        assert_eq!(ToggleConfig::new().with_default_event("").default_event, "click");
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    #[test]
    fn new_engine_waits_for_content_loaded() {
        let (mut engine, _, button) = nav_scenario();
        assert!(!engine
            .listeners()
            .contains(ListenerTarget::Node(button), "click", Handler::ToggleSelf));

        engine.content_loaded();
        assert!(engine
            .listeners()
            .contains(ListenerTarget::Node(button), "click", Handler::ToggleSelf));
        assert!(!engine.listeners().contains(
            ListenerTarget::Document,
            CONTENT_LOADED,
            Handler::Initialize
        ));
    }

    #[test]
    fn content_loaded_runs_once() {
        let (mut engine, _, button) = nav_scenario();
        engine.content_loaded();
        engine.toggle(button);
        engine.content_loaded();
        assert!(engine.is_active(button));
        assert_eq!(engine.listener_count(), 1);
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    #[test]
    fn click_toggles_and_prevents_default() {
        let (mut engine, nav, button) = nav_scenario();
        engine.init();

        let event = engine.click(button);
        assert!(event.is_default_prevented());
        assert!(engine.is_active(button));
        assert!(engine.document().get(nav).unwrap().has_class("open"));

        engine.click(button);
        assert!(!engine.is_active(button));
        assert!(!engine.document().get(nav).unwrap().has_class("open"));
    }

    #[test]
    fn click_on_non_trigger_is_not_prevented() {
        let (mut engine, nav, _) = nav_scenario();
        engine.init();
        assert!(!engine.click(nav).is_default_prevented());
    }

    #[test]
    fn click_bubbles_from_descendant() {
        let (mut engine, _, button) = nav_scenario();
        let icon = engine
            .document_mut()
            .insert_child(button, NodeData::new("span"));
        engine.init();
        engine.click(icon);
        assert!(engine.is_active(button));
    }

    #[test]
    fn dispatch_to_stale_target_is_noop() {
        let (mut engine, _, button) = nav_scenario();
        engine.init();
        engine.remove_element(button);
        let event = engine.click(button);
        assert!(!event.is_default_prevented());
    }

    // ── Teardown ─────────────────────────────────────────────────────

    #[test]
    fn remove_element_purges_state() {
        let (mut engine, nav, button) = nav_scenario();
        engine.init();
        engine.click(button);
        assert_eq!(engine.remove_element(nav), 2);
        assert!(!engine.is_active(button));
        assert_eq!(engine.listeners().count_for(ListenerTarget::Node(button)), 0);
    }

    #[test]
    fn prune_after_direct_removal() {
        let (mut engine, nav, button) = nav_scenario();
        engine.init();
        engine.click(button);
        engine.document_mut().remove(nav);
        assert_eq!(engine.prune(), 1);
        assert!(engine.listeners().node_targets().is_empty());
        assert_eq!(engine.prune(), 0);
    }
}
