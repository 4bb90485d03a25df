//! Selector matching against document elements.
//!
//! Selectors are matched right to left: the rightmost compound must match the
//! candidate element, then each combinator walks up the tree looking for an
//! element that matches the next compound to the left.

use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;
use crate::selector::model::{
    Combinator, CompoundSelector, Selector, SelectorComponent, SelectorList, SelectorPart,
};

impl SelectorList {
    /// Whether any selector in the list matches `node`.
    pub fn matches(&self, node: NodeId, dom: &Dom) -> bool {
        self.selectors
            .iter()
            .any(|selector| matches_selector(selector, node, dom))
    }
}

impl Selector {
    /// Whether this selector matches `node`.
    pub fn matches(&self, node: NodeId, dom: &Dom) -> bool {
        matches_selector(self, node, dom)
    }
}

/// Check whether a full selector matches a given node.
pub fn matches_selector(selector: &Selector, node_id: NodeId, dom: &Dom) -> bool {
    let parts = &selector.parts;
    let Some(SelectorPart::Compound(rightmost)) = parts.last() else {
        return false;
    };
    match dom.get(node_id) {
        Some(node) if matches_compound(rightmost, node) => {}
        _ => return false,
    }
    matches_leftward(parts, parts.len() - 1, node_id, dom)
}

/// Match the parts left of `part_idx`, given that `parts[part_idx]` matched
/// `current`.
///
/// Descendant combinators backtrack: if the nearest matching ancestor does
/// not satisfy the rest of the chain, farther ancestors are tried.
fn matches_leftward(parts: &[SelectorPart], part_idx: usize, current: NodeId, dom: &Dom) -> bool {
    if part_idx == 0 {
        return true;
    }
    if part_idx < 2 {
        // Combinator without a preceding compound.
        return false;
    }
    let (SelectorPart::Combinator(combinator), SelectorPart::Compound(compound)) =
        (&parts[part_idx - 1], &parts[part_idx - 2])
    else {
        return false;
    };
    let next_idx = part_idx - 2;

    match combinator {
        Combinator::Child => match dom.parent(current) {
            Some(parent_id) => {
                dom.get(parent_id)
                    .is_some_and(|parent| matches_compound(compound, parent))
                    && matches_leftward(parts, next_idx, parent_id, dom)
            }
            None => false,
        },
        Combinator::Descendant => dom.ancestors(current).into_iter().any(|ancestor_id| {
            dom.get(ancestor_id)
                .is_some_and(|ancestor| matches_compound(compound, ancestor))
                && matches_leftward(parts, next_idx, ancestor_id, dom)
        }),
    }
}

/// Check whether a compound selector matches a single element.
///
/// The `#document` node never matches.
pub fn matches_compound(compound: &CompoundSelector, node: &NodeData) -> bool {
    if node.is_document() || compound.components.is_empty() {
        return false;
    }
    compound.components.iter().all(|component| match component {
        SelectorComponent::Type(name) => node.tag == *name,
        SelectorComponent::Class(name) => node.has_class(name),
        SelectorComponent::Id(name) => node.id.as_deref() == Some(name.as_str()),
        SelectorComponent::Universal => true,
        SelectorComponent::Attribute(attr) => {
            if attr.name == "class" {
                let joined = node.class_attribute();
                let value = node.has_attribute("class").then_some(joined.as_str());
                attr.matches_value(value)
            } else {
                attr.matches_value(node.attribute(&attr.name))
            }
        }
    })
}
