//! Target resolution.

use tracing::{trace, warn};

use crate::dom::node::NodeId;
use crate::engine::ToggleEngine;
use crate::selector::parse_selector_list;

use super::schema::{Targeting, Trigger};

impl ToggleEngine {
    /// Targets of the trigger at `node`, in document order.
    ///
    /// Evaluated against the current document on every call. Empty when the
    /// node is not a trigger, has no targeting attribute, its selector does
    /// not parse, or nothing matches.
    pub fn resolve_targets(&self, node: NodeId) -> Vec<NodeId> {
        match self.read_trigger(node) {
            Some(trigger) => self.resolve(node, &trigger),
            None => Vec::new(),
        }
    }

    pub(crate) fn resolve(&self, node: NodeId, trigger: &Trigger) -> Vec<NodeId> {
        let (scope, selector) = match &trigger.targeting {
            Targeting::None => return Vec::new(),
            Targeting::All(sel) => (None, sel),
            Targeting::Parent(sel) => match self.dom.parent(node) {
                Some(parent) => (Some(parent), sel),
                None => {
                    trace!(?node, "parent-scoped trigger has no parent");
                    return Vec::new();
                }
            },
            Targeting::Itself(sel) => (Some(node), sel),
        };

        let list = match parse_selector_list(selector) {
            Ok(list) => list,
            Err(err) => {
                warn!(?node, selector = %selector, %err, "invalid target selector");
                return Vec::new();
            }
        };

        let targets = match (scope, &trigger.targeting) {
            (Some(parent), Targeting::Parent(_)) => {
                // The parent is a candidate along with its descendants.
                let mut found: Vec<NodeId> = Some(parent)
                    .filter(|&p| list.matches(p, &self.dom))
                    .into_iter()
                    .collect();
                found.extend(self.dom.select_within(parent, &list));
                found
            }
            (Some(scope), _) => self.dom.select_within(scope, &list),
            (None, _) => self.dom.select_all(&list),
        };
        trace!(?node, count = targets.len(), "targets resolved");
        targets
    }
}
