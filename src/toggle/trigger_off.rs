//! Trigger-off delegation: controls inside a target that deactivate the
//! owning trigger when clicked.

use tracing::debug;

use crate::dom::node::NodeId;
use crate::engine::ToggleEngine;
use crate::event::input::CLICK;
use crate::event::listener::{Handler, ListenerTarget};

impl ToggleEngine {
    /// Wire or unwire the trigger-off controls under `target` for `owner`.
    ///
    /// On activation every control is pointed at `owner` and gets a click
    /// listener. On deactivation only controls still owned by `owner` are
    /// released, so a control claimed by another trigger keeps working.
    pub(crate) fn sync_trigger_off(&mut self, target: NodeId, owner: NodeId, active: bool) {
        let schema = &self.schema;
        let controls: Vec<NodeId> = self
            .dom
            .descendants(target)
            .into_iter()
            .filter(|&id| self.dom.get(id).is_some_and(|n| schema.is_trigger_off(n)))
            .collect();

        for control in controls {
            if active {
                self.state.set_owner(control, owner);
                if self
                    .listeners
                    .add(ListenerTarget::Node(control), CLICK, Handler::TriggerOff)
                {
                    debug!(?control, ?owner, "trigger-off wired");
                }
            } else if self.state.owner_of(control) == Some(owner) {
                self.state.clear_owner(control);
                self.listeners
                    .remove(ListenerTarget::Node(control), CLICK, Handler::TriggerOff);
                debug!(?control, ?owner, "trigger-off released");
            }
        }
    }

    /// Click handler of a trigger-off control: deactivate its owner.
    pub(crate) fn trigger_off_clicked(&mut self, control: NodeId) {
        let Some(owner) = self.state.owner_of(control) else {
            return;
        };
        if self.state.is_active(owner) {
            self.toggle(owner);
        }
    }

    /// Owning trigger recorded for a trigger-off control.
    pub fn owner_of(&self, control: NodeId) -> Option<NodeId> {
        self.state.owner_of(control)
    }
}
