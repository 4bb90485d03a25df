//! Element tree: insertion, subtree removal, moves and traversal.

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeData, NodeId};

/// A document held in a slotmap arena.
///
/// Element data lives in one `SlotMap`; links live in secondary maps keyed
/// by the same ids. Ids are generational, so an id held past its element's
/// removal never aliases a later element and simply stops resolving.
#[derive(Debug, Clone, Default)]
pub struct Dom {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    root: Option<NodeId>,
}

impl Dom {
    /// An empty arena with no root.
    pub fn new() -> Self {
        Self::default()
    }

    /// An arena holding only a `#document` root.
    pub fn with_document() -> Self {
        let mut dom = Self::new();
        dom.insert(NodeData::document());
        dom
    }

    /// Insert a parentless node. The first one inserted becomes the root.
    pub fn insert(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.root.get_or_insert(id);
        id
    }

    /// Append a node to `parent`'s children.
    ///
    /// A missing `parent` leaves the node detached.
    pub fn insert_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.attach(id, parent);
        id
    }

    /// Remove `id` with its whole subtree.
    ///
    /// Returns the removed ids in document order, starting with `id`.
    /// Empty if `id` is not in the arena.
    pub fn remove(&mut self, id: NodeId) -> Vec<NodeId> {
        let removed = self.walk_depth_first(id);
        if removed.is_empty() {
            return removed;
        }
        self.detach(id);
        if self.root == Some(id) {
            self.root = None;
        }
        for &gone in &removed {
            self.nodes.remove(gone);
            self.children.remove(gone);
            self.parent.remove(gone);
        }
        removed
    }

    /// Move `node`, subtree included, to the end of `new_parent`'s children.
    ///
    /// Returns `false` without changing anything when either id is stale or
    /// `new_parent` lies inside `node`.
    pub fn reparent(&mut self, node: NodeId, new_parent: NodeId) -> bool {
        if !self.contains(node) || !self.contains(new_parent) || self.contains_node(node, new_parent)
        {
            return false;
        }
        self.detach(node);
        self.attach(node, new_parent);
        true
    }

    fn attach(&mut self, node: NodeId, parent: NodeId) {
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(node);
            self.parent.insert(node, parent);
        }
    }

    fn detach(&mut self, node: NodeId) {
        let Some(old) = self.parent.remove(node) else {
            return;
        };
        if let Some(siblings) = self.children.get_mut(old) {
            siblings.retain(|&child| child != node);
        }
    }

    // ── Navigation ───────────────────────────────────────────────────

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Children in order; empty for leaves and stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Ancestors of `id`, nearest first, ending at the root. Excludes `id`.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        std::iter::successors(self.parent(id), |&p| self.parent(p)).collect()
    }

    /// Whether `node` is `ancestor` or lies beneath it.
    pub fn contains_node(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.contains(node)
            && std::iter::successors(Some(node), |&n| self.parent(n)).any(|n| n == ancestor)
    }

    /// Nearest element, starting at `id` itself, whose data satisfies
    /// `predicate`.
    pub fn closest_by(&self, id: NodeId, predicate: impl Fn(&NodeData) -> bool) -> Option<NodeId> {
        std::iter::successors(Some(id), |&n| self.parent(n))
            .map_while(|n| self.get(n).map(|data| (n, data)))
            .find(|(_, data)| predicate(data))
            .map(|(n, _)| n)
    }

    // ── Access ───────────────────────────────────────────────────────

    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` still resolves to an element.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    // ── Traversal ────────────────────────────────────────────────────

    /// `start` and its subtree in document order (pre-order).
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if self.contains(current) {
                order.push(current);
                stack.extend(self.children(current).iter().rev());
            }
        }
        order
    }

    /// Subtree of `start` in document order, without `start`.
    pub fn descendants(&self, start: NodeId) -> Vec<NodeId> {
        self.walk_depth_first(start).into_iter().skip(1).collect()
    }
}
