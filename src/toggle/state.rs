//! Side table: per-element toggle state kept outside the document.
//!
//! Elements themselves carry only markup. The active flag, the "listeners
//! bound" marker and the trigger-off back-reference live here, keyed by
//! [`NodeId`], so removing an element is a matter of dropping its entries.

use slotmap::SecondaryMap;

use crate::dom::node::NodeId;

/// State tracked for a trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerState {
    pub active: bool,
    /// Own event listener has been bound by `init`.
    pub bound: bool,
}

/// Engine-owned map from element id to toggle state.
#[derive(Debug, Default, Clone)]
pub struct SideTable {
    triggers: SecondaryMap<NodeId, TriggerState>,
    /// trigger-off element -> owning trigger.
    owners: SecondaryMap<NodeId, NodeId>,
}

impl SideTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active flag of `trigger`; `false` when untracked.
    pub fn is_active(&self, trigger: NodeId) -> bool {
        self.triggers.get(trigger).is_some_and(|s| s.active)
    }

    pub fn set_active(&mut self, trigger: NodeId, active: bool) {
        self.entry(trigger).active = active;
    }

    pub fn is_bound(&self, trigger: NodeId) -> bool {
        self.triggers.get(trigger).is_some_and(|s| s.bound)
    }

    pub fn mark_bound(&mut self, trigger: NodeId) {
        self.entry(trigger).bound = true;
    }

    /// Full state of `trigger`, if tracked.
    pub fn trigger(&self, trigger: NodeId) -> Option<TriggerState> {
        self.triggers.get(trigger).copied()
    }

    /// Owning trigger of a trigger-off element.
    pub fn owner_of(&self, trigger_off: NodeId) -> Option<NodeId> {
        self.owners.get(trigger_off).copied()
    }

    /// Point `trigger_off` at `owner`, returning the previous owner.
    pub fn set_owner(&mut self, trigger_off: NodeId, owner: NodeId) -> Option<NodeId> {
        self.owners.insert(trigger_off, owner)
    }

    pub fn clear_owner(&mut self, trigger_off: NodeId) -> Option<NodeId> {
        self.owners.remove(trigger_off)
    }

    /// Drop every back-reference pointing at `owner`, returning the
    /// trigger-off elements that were released.
    pub fn release_owned_by(&mut self, owner: NodeId) -> Vec<NodeId> {
        let released: Vec<NodeId> = self
            .owners
            .iter()
            .filter(|(_, &o)| o == owner)
            .map(|(id, _)| id)
            .collect();
        for &id in &released {
            self.owners.remove(id);
        }
        released
    }

    /// Drop all state recorded for `id`, as trigger and as trigger-off.
    pub fn forget(&mut self, id: NodeId) {
        self.triggers.remove(id);
        self.owners.remove(id);
    }

    /// Every id with an entry, in no particular order.
    pub fn tracked(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.triggers.keys().collect();
        ids.extend(self.owners.keys().filter(|id| !self.triggers.contains_key(*id)));
        ids
    }

    /// Number of triggers currently active.
    pub fn active_count(&self) -> usize {
        self.triggers.values().filter(|s| s.active).count()
    }

    fn entry(&mut self, trigger: NodeId) -> &mut TriggerState {
        if !self.triggers.contains_key(trigger) {
            self.triggers.insert(trigger, TriggerState::default());
        }
        &mut self.triggers[trigger]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn make_ids(n: usize) -> Vec<NodeId> {
        let mut sm: SlotMap<NodeId, ()> = SlotMap::with_key();
        (0..n).map(|_| sm.insert(())).collect()
    }

    #[test]
    fn untracked_defaults() {
        let ids = make_ids(1);
        let table = SideTable::new();
        assert!(!table.is_active(ids[0]));
        assert!(!table.is_bound(ids[0]));
        assert_eq!(table.trigger(ids[0]), None);
        assert_eq!(table.owner_of(ids[0]), None);
    }

    #[test]
    fn active_and_bound_are_independent() {
        let ids = make_ids(1);
        let mut table = SideTable::new();
        table.mark_bound(ids[0]);
        assert!(table.is_bound(ids[0]));
        assert!(!table.is_active(ids[0]));
        table.set_active(ids[0], true);
        assert_eq!(
            table.trigger(ids[0]),
            Some(TriggerState {
                active: true,
                bound: true
            })
        );
        assert_eq!(table.active_count(), 1);
    }

    #[test]
    fn owners() {
        let ids = make_ids(3);
        let (off_a, off_b, owner) = (ids[0], ids[1], ids[2]);
        let mut table = SideTable::new();
        assert_eq!(table.set_owner(off_a, owner), None);
        table.set_owner(off_b, owner);
        assert_eq!(table.owner_of(off_a), Some(owner));

        let mut released = table.release_owned_by(owner);
        released.sort();
        let mut expected = vec![off_a, off_b];
        expected.sort();
        assert_eq!(released, expected);
        assert_eq!(table.owner_of(off_a), None);
    }

    #[test]
    fn forget_drops_both_roles() {
        let ids = make_ids(2);
        let mut table = SideTable::new();
        table.set_active(ids[0], true);
        table.set_owner(ids[0], ids[1]);
        assert_eq!(table.tracked(), vec![ids[0]]);
        table.forget(ids[0]);
        assert!(table.tracked().is_empty());
        assert!(!table.is_active(ids[0]));
    }
}
