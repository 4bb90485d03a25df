//! Event types: [`Event`] and [`Key`].
//!
//! Events are identified by their DOM type name (`"click"`, `"keyup"`, ...)
//! so that markup can name arbitrary event types through the
//! `data-toggle-event` attribute.

use crate::dom::node::NodeId;

/// `click` event type.
pub const CLICK: &str = "click";
/// `keyup` event type.
pub const KEY_UP: &str = "keyup";
/// Fired once when the host document has finished loading.
pub const CONTENT_LOADED: &str = "DOMContentLoaded";

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key carried by key events.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Char(char),
    /// Any other named key, kept verbatim.
    Other(String),
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value. Both `"Escape"` and the legacy
    /// `"Esc"` map to [`Key::Escape`].
    pub fn from_dom_key(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            "Tab" => Key::Tab,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Key::Char(ch),
                    _ => Key::Other(name.to_owned()),
                }
            }
        }
    }

    /// Map a legacy `KeyboardEvent.keyCode`.
    pub fn from_key_code(code: u32) -> Self {
        match code {
            27 => Key::Escape,
            13 => Key::Enter,
            9 => Key::Tab,
            32 | 48..=57 | 65..=90 => {
                char::from_u32(code).map_or_else(|| Key::Other(code.to_string()), Key::Char)
            }
            _ => Key::Other(code.to_string()),
        }
    }

    /// Whether this is the Escape key.
    pub fn is_escape(&self) -> bool {
        matches!(self, Key::Escape)
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// An event dispatched into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Event type name, e.g. `"click"`.
    pub event_type: String,
    /// The element the event originated on.
    pub target: NodeId,
    /// Key for keyboard events.
    pub key: Option<Key>,
    default_prevented: bool,
}

impl Event {
    /// Create an event of an arbitrary type.
    pub fn new(event_type: impl Into<String>, target: NodeId) -> Self {
        Self {
            event_type: event_type.into(),
            target,
            key: None,
            default_prevented: false,
        }
    }

    /// A `click` on `target`.
    pub fn click(target: NodeId) -> Self {
        Self::new(CLICK, target)
    }

    /// A `keyup` of `key` on `target`.
    pub fn key_up(target: NodeId, key: Key) -> Self {
        Self {
            key: Some(key),
            ..Self::new(KEY_UP, target)
        }
    }

    /// `DOMContentLoaded`, targeted at the document node.
    pub fn content_loaded(document: NodeId) -> Self {
        Self::new(CONTENT_LOADED, document)
    }

    /// Suppress the host's default action (link navigation, form submission).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a listener called [`prevent_default`](Self::prevent_default).
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Whether this is a key event for the Escape key.
    pub fn is_escape(&self) -> bool {
        self.key.as_ref().is_some_and(Key::is_escape)
    }
}
