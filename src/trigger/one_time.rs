//! Trigger that fires once.

use super::{Juncture, Trigger};
use crate::core::Event;
use crate::machine::StateMachine;

/// Fires the first time its juncture holds on the bound machine, then is
/// done for good. Containers unregister it in the same delivery cycle.
pub struct OneTimeTrigger<E: Event, J: Juncture<E>> {
    event: E,
    juncture: J,
    done: bool,
}

impl<E: Event, J: Juncture<E>> OneTimeTrigger<E, J> {
    pub fn new(event: E, juncture: J) -> Self {
        Self {
            event,
            juncture,
            done: false,
        }
    }
}

impl<E: Event, J: Juncture<E>> Trigger<E> for OneTimeTrigger<E, J> {
    fn is_active(&mut self, machine: &dyn StateMachine<E>) -> bool {
        if !self.done && self.juncture.is_bound_to(machine) && self.juncture.is_condition_met() {
            self.done = true;
            return true;
        }
        false
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn event(&self) -> &E {
        &self.event
    }
}
