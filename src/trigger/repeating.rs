//! Trigger that fires every time its juncture holds.

use super::{Juncture, Trigger};
use crate::core::Event;
use crate::machine::StateMachine;

/// Fires on every delivery cycle in which its juncture holds on the bound
/// machine. Never done; remove it from the container explicitly.
pub struct RepeatingTrigger<E: Event, J: Juncture<E>> {
    event: E,
    juncture: J,
}

impl<E: Event, J: Juncture<E>> RepeatingTrigger<E, J> {
    pub fn new(event: E, juncture: J) -> Self {
        Self { event, juncture }
    }
}

impl<E: Event, J: Juncture<E>> Trigger<E> for RepeatingTrigger<E, J> {
    fn is_active(&mut self, machine: &dyn StateMachine<E>) -> bool {
        self.juncture.is_bound_to(machine) && self.juncture.is_condition_met()
    }

    fn is_done(&self) -> bool {
        false
    }

    fn event(&self) -> &E {
        &self.event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::mock::{MockMachine, Probe};
    use crate::trigger::EventJuncture;
    use std::sync::Arc;

    fn juncture_trigger(machine: &Arc<MockMachine>) -> RepeatingTrigger<Probe, EventJuncture<Probe>> {
        let juncture = EventJuncture::new(Arc::clone(machine), |e: &Probe| e.0 == "Juncture");
        RepeatingTrigger::new(Probe("Emitted"), juncture)
    }

    #[test]
    fn active_while_condition_holds() {
        let machine = Arc::new(MockMachine::new("Fsm", "Any"));
        machine.set_latest(Probe("Juncture"));
        let mut trigger = juncture_trigger(&machine);

        assert!(trigger.is_active(&*machine));
        assert!(trigger.is_active(&*machine));

        machine.input(Probe("Other")).unwrap();
        assert!(!trigger.is_active(&*machine));
    }

    #[test]
    fn never_done() {
        let machine = Arc::new(MockMachine::new("Fsm", "Any"));
        machine.set_latest(Probe("Juncture"));
        let mut trigger = juncture_trigger(&machine);

        assert!(!trigger.is_done());
        trigger.is_active(&*machine);
        assert!(!trigger.is_done());
    }

    #[test]
    fn event_is_the_configured_one() {
        let machine = Arc::new(MockMachine::new("Fsm", "Any"));
        let trigger = juncture_trigger(&machine);

        assert_eq!(trigger.event(), &Probe("Emitted"));
    }
}
