//! Harness: selector-addressed interaction with a headless engine.
//!
//! The `Harness` wraps a [`ToggleEngine`] loaded from markup and provides
//! methods to simulate user interaction (clicks, key presses, arbitrary
//! events) and inspect classes, attributes and active flags by selector.

use crate::dom::node::NodeId;
use crate::engine::{ToggleConfig, ToggleEngine};
use crate::event::input::{Event, Key};
use crate::markup::{to_markup, MarkupError};

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// A headless engine driver for testing.
///
/// Selector-addressed methods act on the first match in document order and
/// return `None` when nothing matches or the selector does not parse.
///
/// # Examples
///
/// ```
/// use toggle_state::testing::Harness;
///
/// let mut h = Harness::load(
///     r#"<nav class="menu"><button data-toggle-class="open" data-toggle-target-parent=".menu"></button></nav>"#,
/// )
/// .unwrap();
/// h.click("button");
/// assert!(h.has_class("nav", "open"));
/// assert!(h.is_active("button"));
/// ```
#[derive(Debug, Clone)]
pub struct Harness {
    engine: ToggleEngine,
}

impl Harness {
    /// Load markup and fire `DOMContentLoaded`.
    pub fn load(source: &str) -> Result<Self, MarkupError> {
        Self::with_config(source, ToggleConfig::default())
    }

    /// Load markup with an explicit configuration.
    pub fn with_config(source: &str, config: ToggleConfig) -> Result<Self, MarkupError> {
        Ok(Self {
            engine: ToggleEngine::from_markup_with_config(source, config)?,
        })
    }

    /// Wrap an existing engine as is.
    pub fn from_engine(engine: ToggleEngine) -> Self {
        Self { engine }
    }

    // ── Lookup ───────────────────────────────────────────────────────

    /// First element matching `selector`.
    pub fn find(&self, selector: &str) -> Option<NodeId> {
        self.engine
            .document()
            .query_selector(selector)
            .ok()
            .flatten()
    }

    /// Every element matching `selector`, in document order.
    pub fn find_all(&self, selector: &str) -> Vec<NodeId> {
        self.engine
            .document()
            .query_selector_all(selector)
            .unwrap_or_default()
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Click the first element matching `selector`.
    pub fn click(&mut self, selector: &str) -> Option<Event> {
        let node = self.find(selector)?;
        Some(self.engine.click(node))
    }

    /// Fire an event of `event_type` at the first element matching `selector`.
    pub fn fire(&mut self, selector: &str, event_type: &str) -> Option<Event> {
        let node = self.find(selector)?;
        Some(self.engine.dispatch(Event::new(event_type, node)))
    }

    /// Release `key` with focus on the document body (or the first element
    /// when there is no body).
    pub fn key_up(&mut self, key: Key) -> Option<Event> {
        let node = self.find("body").or_else(|| self.find("*"))?;
        Some(self.engine.key_up(node, key))
    }

    /// Release the Escape key.
    pub fn press_escape(&mut self) -> Option<Event> {
        self.key_up(Key::Escape)
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Whether the first element matching `selector` has `class`.
    pub fn has_class(&self, selector: &str, class: &str) -> bool {
        self.find(selector)
            .and_then(|id| self.engine.document().get(id))
            .is_some_and(|data| data.has_class(class))
    }

    /// Active flag of the first element matching `selector`.
    pub fn is_active(&self, selector: &str) -> bool {
        self.find(selector)
            .is_some_and(|id| self.engine.is_active(id))
    }

    /// Attribute value of the first element matching `selector`.
    pub fn attribute(&self, selector: &str, name: &str) -> Option<String> {
        let id = self.find(selector)?;
        self.engine
            .document()
            .get(id)?
            .attribute(name)
            .map(str::to_owned)
    }

    /// Serialized document.
    pub fn markup(&self) -> String {
        to_markup(self.engine.document())
    }

    /// Borrow the underlying engine immutably.
    pub fn engine(&self) -> &ToggleEngine {
        &self.engine
    }

    /// Borrow the underlying engine mutably.
    pub fn engine_mut(&mut self) -> &mut ToggleEngine {
        &mut self.engine
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::listener::ListenerTarget;

    const MENU: &str = r#"
        <body>
          <nav class="menu">
            <button data-toggle-class="open" data-toggle-target-parent=".menu" aria-expanded="false">Menu</button>
          </nav>
        </body>"#;

    #[test]
    fn load_binds_triggers() {
        let h = Harness::load(MENU).unwrap();
        let button = h.find("button").unwrap();
        assert_eq!(h.engine().listeners().count_for(ListenerTarget::Node(button)), 1);
    }

    #[test]
    fn click_by_selector() {
        let mut h = Harness::load(MENU).unwrap();
        let event = h.click("button").unwrap();
        assert!(event.is_default_prevented());
        assert!(h.has_class("nav", "open"));
        assert_eq!(h.attribute("button", "aria-expanded").as_deref(), Some("true"));
    }

    #[test]
    fn missing_or_invalid_selector() {
        let mut h = Harness::load(MENU).unwrap();
        assert!(h.click("aside").is_none());
        assert!(h.click("button:hover").is_none());
        assert!(h.find_all("[").is_empty());
        assert!(!h.is_active("aside"));
        assert!(!h.has_class("aside", "open"));
    }

    #[test]
    fn fire_custom_event_does_nothing_for_click_triggers() {
        let mut h = Harness::load(MENU).unwrap();
        let event = h.fire("button", "mouseover").unwrap();
        assert!(!event.is_default_prevented());
        assert!(!h.is_active("button"));
    }

    #[test]
    fn key_up_targets_body() {
        let mut h = Harness::load(MENU).unwrap();
        let body = h.find("body").unwrap();
        assert_eq!(h.press_escape().unwrap().target, body);
    }

    #[test]
    fn markup_reflects_state() {
        let mut h = Harness::load("<div><a data-toggle-class=x></a></div>").unwrap();
        h.click("a");
        assert_eq!(
            h.markup(),
            r#"<html><head></head><body><div><a class="x" data-toggle-class="x"></a></div></body></html>"#
        );
    }
}
