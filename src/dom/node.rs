//! Node types: NodeId, NodeData.

use slotmap::new_key_type;

new_key_type! {
    /// Unique identifier for a document element. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Tag name reserved for the document node at the root of a parsed tree.
pub const DOCUMENT_TAG: &str = "#document";

/// Data associated with a single document element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// Lower-case tag name (e.g. "button", "nav").
    pub tag: String,
    /// Optional unique id (`id` attribute, `#id` selector).
    pub id: Option<String>,
    /// Class list (`class` attribute, `.class` selector).
    pub classes: Vec<String>,
    /// All other attributes, in source order.
    pub attributes: Vec<(String, String)>,
}

impl NodeData {
    /// Create a new element with the given tag and no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Create the `#document` node that roots a parsed tree.
    pub fn document() -> Self {
        Self {
            tag: DOCUMENT_TAG.to_owned(),
            id: None,
            classes: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Whether this is the `#document` node.
    pub fn is_document(&self) -> bool {
        self.tag == DOCUMENT_TAG
    }

    /// Set the id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a single class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        self.add_class(&class);
        self
    }

    /// Add multiple classes (builder).
    pub fn with_classes(mut self, classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for class in classes {
            let class = class.into();
            self.add_class(&class);
        }
        self
    }

    /// Set an attribute (builder). See [`set_attribute`](Self::set_attribute).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Check whether this element has a given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if !class.is_empty() && !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    /// Remove a class. No-op if not present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Toggle a class: add if absent, remove if present.
    pub fn toggle_class(&mut self, class: &str) {
        if self.has_class(class) {
            self.remove_class(class);
        } else {
            self.add_class(class);
        }
    }

    /// Force class membership to `present`.
    pub fn set_class(&mut self, class: &str, present: bool) {
        if present {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Whether the attribute is present. `id` and `class` are answered from
    /// their dedicated fields.
    pub fn has_attribute(&self, name: &str) -> bool {
        match name {
            "id" => self.id.is_some(),
            "class" => !self.classes.is_empty(),
            _ => self.attributes.iter().any(|(n, _)| n == name),
        }
    }

    /// Attribute value, if present.
    ///
    /// `class` is not stored as a string; use [`class_attribute`](Self::class_attribute).
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "id" => self.id.as_deref(),
            _ => self
                .attributes
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
        }
    }

    /// The class list joined with single spaces.
    pub fn class_attribute(&self) -> String {
        self.classes.join(" ")
    }

    /// Set an attribute, replacing any previous value.
    ///
    /// `id` sets [`id`](Self::id); `class` replaces the class list with the
    /// whitespace-separated tokens of `value`.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        match name.as_str() {
            "id" => self.id = Some(value),
            "class" => {
                self.classes.clear();
                for token in value.split_ascii_whitespace() {
                    self.add_class(token);
                }
            }
            _ => match self.attributes.iter_mut().find(|(n, _)| *n == name) {
                Some((_, existing)) => *existing = value,
                None => self.attributes.push((name, value)),
            },
        }
    }

    /// Remove an attribute. No-op if absent.
    pub fn remove_attribute(&mut self, name: &str) {
        match name {
            "id" => self.id = None,
            "class" => self.classes.clear(),
            _ => self.attributes.retain(|(n, _)| n != name),
        }
    }
}
