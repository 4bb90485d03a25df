//! Propagation path computation.
//!
//! Events bubble from their target element through each ancestor element and
//! finish at the document. The path is fixed when dispatch starts; the
//! listeners at each stop are read when the event reaches that stop.

use super::listener::ListenerTarget;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;

/// Compute the bubble path for an event targeted at `start`.
///
/// Returns `[start, parent, ..., outermost element, Document]`. The
/// `#document` node is represented by [`ListenerTarget::Document`] rather
/// than as an element stop. If `start` does not exist, returns an empty vec.
pub fn propagation_path(dom: &Dom, start: NodeId) -> Vec<ListenerTarget> {
    let Some(data) = dom.get(start) else {
        return Vec::new();
    };
    if data.is_document() {
        return vec![ListenerTarget::Document];
    }

    let mut path = vec![ListenerTarget::Node(start)];
    path.extend(
        dom.ancestors(start)
            .into_iter()
            .filter(|&id| dom.get(id).is_some_and(|n| !n.is_document()))
            .map(ListenerTarget::Node),
    );
    path.push(ListenerTarget::Document);
    path
}
