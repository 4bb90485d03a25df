//! Document queries: selector queries, `closest`, and predicate matching.
//!
//! All queries return nodes in document order (pre-order depth-first from the
//! root). Nodes detached from the root are never returned by document-wide
//! queries.

use super::node::{NodeData, NodeId};
use super::tree::Dom;
use crate::selector::{parse_selector_list, SelectorError, SelectorList};

impl Dom {
    /// All elements matching `selector` in the whole document
    /// (`document.querySelectorAll`).
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let list = parse_selector_list(selector)?;
        Ok(self.select_all(&list))
    }

    /// First element matching `selector` in the whole document.
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let list = parse_selector_list(selector)?;
        Ok(self
            .document_order()
            .into_iter()
            .find(|&id| list.matches(id, self)))
    }

    /// Descendants of `scope` matching `selector` (`element.querySelectorAll`).
    ///
    /// `scope` itself is never returned, but combinators may match ancestors
    /// outside of it.
    pub fn query_selector_all_within(
        &self,
        scope: NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>, SelectorError> {
        let list = parse_selector_list(selector)?;
        Ok(self.select_within(scope, &list))
    }

    /// Whether `node` matches `selector`.
    pub fn matches(&self, node: NodeId, selector: &str) -> Result<bool, SelectorError> {
        let list = parse_selector_list(selector)?;
        Ok(list.matches(node, self))
    }

    /// Nearest inclusive ancestor of `node` matching `selector`.
    pub fn closest(&self, node: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let list = parse_selector_list(selector)?;
        let mut current = Some(node).filter(|&id| self.contains(id));
        while let Some(id) = current {
            if list.matches(id, self) {
                return Ok(Some(id));
            }
            current = self.parent(id);
        }
        Ok(None)
    }

    /// All elements in the document matching a pre-parsed selector list.
    pub fn select_all(&self, list: &SelectorList) -> Vec<NodeId> {
        self.document_order()
            .into_iter()
            .filter(|&id| list.matches(id, self))
            .collect()
    }

    /// Descendants of `scope` matching a pre-parsed selector list.
    pub fn select_within(&self, scope: NodeId, list: &SelectorList) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&id| list.matches(id, self))
            .collect()
    }

    /// Find the first element whose `id` matches the given string.
    pub fn query_by_id(&self, id: &str) -> Option<NodeId> {
        self.query_all(|data| data.id.as_deref() == Some(id))
            .into_iter()
            .next()
    }

    /// Find all elements that have the given class.
    pub fn query_by_class(&self, class: &str) -> Vec<NodeId> {
        self.query_all(|data| data.has_class(class))
    }

    /// Find all elements that carry the given attribute.
    pub fn query_by_attribute(&self, name: &str) -> Vec<NodeId> {
        self.query_all(|data| data.has_attribute(name))
    }

    /// Find all elements matching an arbitrary predicate, in document order.
    ///
    /// The `#document` node is never passed to the predicate.
    pub fn query_all(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.document_order()
            .into_iter()
            .filter(|&id| {
                self.get(id)
                    .is_some_and(|data| !data.is_document() && predicate(data))
            })
            .collect()
    }

    /// Every node reachable from the root, in document order.
    fn document_order(&self) -> Vec<NodeId> {
        match self.root() {
            Some(root) => self.walk_depth_first(root),
            None => Vec::new(),
        }
    }
}
