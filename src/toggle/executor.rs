//! Toggle executor: the single state transition used by clicks, Escape,
//! trigger-off controls and default activation.

use tracing::debug;

use crate::dom::node::NodeId;
use crate::engine::ToggleEngine;

use super::schema::{Trigger, ARIA_EXPANDED, ARIA_SELECTED};

fn flag(active: bool) -> &'static str {
    if active {
        "true"
    } else {
        "false"
    }
}

impl ToggleEngine {
    /// Toggle the trigger at `node`.
    ///
    /// Returns the new active flag, or `None` when `node` is not a trigger
    /// (no class attribute, or no longer in the document).
    pub fn toggle(&mut self, node: NodeId) -> Option<bool> {
        let trigger = self.read_trigger(node)?;
        let active = !self.state.is_active(node);
        self.transition(node, &trigger, active);
        Some(active)
    }

    /// Read the trigger configuration of `node` with the engine's schema.
    pub(crate) fn read_trigger(&self, node: NodeId) -> Option<Trigger> {
        let data = self.dom.get(node)?;
        Trigger::read(data, &self.schema, &self.config.default_event)
    }

    /// Move `node` to `active`, updating the trigger, its targets, trigger-off
    /// controls and the outside listener in that order.
    pub(crate) fn transition(&mut self, node: NodeId, trigger: &Trigger, active: bool) {
        self.state.set_active(node, active);

        if let Some(data) = self.dom.get_mut(node) {
            if !trigger.target_only {
                data.set_class(&trigger.class_name, active);
            }
            if trigger.mirror_expanded {
                data.set_attribute(ARIA_EXPANDED, flag(active));
            }
            if trigger.mirror_selected {
                data.set_attribute(ARIA_SELECTED, flag(active));
            }
        }

        let targets = self.resolve(node, trigger);
        for &target in &targets {
            self.apply_to_target(target, node, trigger, active);
        }

        self.sync_outside_listener(node, trigger, active);

        debug!(
            ?node,
            class = %trigger.class_name,
            active,
            targets = targets.len(),
            "toggled"
        );
    }

    fn apply_to_target(&mut self, target: NodeId, owner: NodeId, trigger: &Trigger, active: bool) {
        if let Some(data) = self.dom.get_mut(target) {
            data.set_class(&trigger.class_name, active);
            if trigger.outside {
                data.set_attribute(self.schema.state.as_str(), flag(active));
            }
        }
        self.sync_trigger_off(target, owner, active);
    }
}
