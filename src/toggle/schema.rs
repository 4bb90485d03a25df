//! Attribute schema: recognised markup attributes and the per-trigger view of
//! them.
//!
//! Every attribute is `data-` + prefix + suffix. The prefix defaults to
//! `toggle-` and is normalised to end with a hyphen.

use crate::dom::node::NodeData;

/// Default attribute prefix.
pub const DEFAULT_PREFIX: &str = "toggle-";

/// Accessibility attribute mirrored from the active flag.
pub const ARIA_EXPANDED: &str = "aria-expanded";
/// Accessibility attribute mirrored from the active flag.
pub const ARIA_SELECTED: &str = "aria-selected";

// ---------------------------------------------------------------------------
// AttributeSchema
// ---------------------------------------------------------------------------

/// Fully qualified names of every recognised attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSchema {
    prefix: String,
    /// Marks a trigger; value is the class to toggle.
    pub class: String,
    pub target_all: String,
    pub target_parent: String,
    pub target_self: String,
    pub is_active: String,
    pub event: String,
    pub outside: String,
    pub target_only: String,
    pub escape: String,
    pub trigger_off: String,
    /// Dismiss-state marker written on targets of outside triggers.
    pub state: String,
}

impl AttributeSchema {
    /// Build the schema for `prefix`.
    ///
    /// A leading `data-` is dropped, the prefix is lowercased and a trailing
    /// hyphen is appended when missing.
    pub fn new(prefix: &str) -> Self {
        let mut prefix = prefix.trim().to_ascii_lowercase();
        if let Some(rest) = prefix.strip_prefix("data-") {
            prefix = rest.to_owned();
        }
        if !prefix.is_empty() && !prefix.ends_with('-') {
            prefix.push('-');
        }

        let name = |suffix: &str| format!("data-{prefix}{suffix}");
        Self {
            class: name("class"),
            target_all: name("target-all"),
            target_parent: name("target-parent"),
            target_self: name("target-self"),
            is_active: name("is-active"),
            event: name("event"),
            outside: name("outside"),
            target_only: name("target-only"),
            escape: name("escape"),
            trigger_off: name("trigger-off"),
            state: name("state"),
            prefix,
        }
    }

    /// The normalised prefix, e.g. `"toggle-"`.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether `node` is a trigger.
    pub fn is_trigger(&self, node: &NodeData) -> bool {
        node.has_attribute(&self.class)
    }

    /// Whether `node` is a dismiss-on-outside trigger.
    pub fn is_outside_trigger(&self, node: &NodeData) -> bool {
        self.is_trigger(node) && node.has_attribute(&self.outside)
    }

    /// Whether `node` is a dismiss-on-Escape trigger.
    pub fn is_escape_trigger(&self, node: &NodeData) -> bool {
        self.is_trigger(node) && node.has_attribute(&self.escape)
    }

    /// Whether `node` is a trigger-off control.
    pub fn is_trigger_off(&self, node: &NodeData) -> bool {
        node.has_attribute(&self.trigger_off)
    }

    /// Whether `node` carries the dismiss-state marker set to `"true"`.
    pub fn is_protected(&self, node: &NodeData) -> bool {
        node.attribute(&self.state) == Some("true")
    }
}

impl Default for AttributeSchema {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

// ---------------------------------------------------------------------------
// Trigger
// ---------------------------------------------------------------------------

/// How a trigger's targets are located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targeting {
    /// Document-wide query.
    All(String),
    /// Query scoped to the trigger's parent.
    Parent(String),
    /// Query scoped to the trigger itself.
    Itself(String),
    /// No targeting attribute: the trigger only toggles itself.
    None,
}

/// A trigger's configuration, read from its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub class_name: String,
    pub targeting: Targeting,
    /// Event name the trigger listens for.
    pub event: String,
    pub outside: bool,
    pub target_only: bool,
    pub escape: bool,
    pub default_active: bool,
    pub mirror_expanded: bool,
    pub mirror_selected: bool,
}

impl Trigger {
    /// Read the trigger configuration from `node`. Returns `None` when the
    /// node has no class attribute.
    ///
    /// Targeting honours the first present of all, parent and self. An empty
    /// event attribute falls back to `default_event`.
    pub fn read(node: &NodeData, schema: &AttributeSchema, default_event: &str) -> Option<Self> {
        let class_name = node.attribute(&schema.class)?.trim().to_owned();

        let targeting = if let Some(sel) = node.attribute(&schema.target_all) {
            Targeting::All(sel.to_owned())
        } else if let Some(sel) = node.attribute(&schema.target_parent) {
            Targeting::Parent(sel.to_owned())
        } else if let Some(sel) = node.attribute(&schema.target_self) {
            Targeting::Itself(sel.to_owned())
        } else {
            Targeting::None
        };

        let event = node
            .attribute(&schema.event)
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(default_event)
            .to_owned();

        Some(Self {
            class_name,
            targeting,
            event,
            outside: node.has_attribute(&schema.outside),
            target_only: node.has_attribute(&schema.target_only),
            escape: node.has_attribute(&schema.escape),
            default_active: node.has_attribute(&schema.is_active),
            mirror_expanded: node.has_attribute(ARIA_EXPANDED),
            mirror_selected: node.has_attribute(ARIA_SELECTED),
        })
    }
}
