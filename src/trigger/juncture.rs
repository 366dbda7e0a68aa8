//! Conditions over a single target machine.

use crate::core::{Event, Guard, State};
use crate::machine::{same_machine, StateMachine};
use std::sync::Arc;

/// Read-only condition bound to exactly one machine.
///
/// Binding is by identity: a juncture only answers for the very instance
/// it was built with, even if another machine shares its name.
pub trait Juncture<E: Event>: Send + Sync {
    /// The machine this juncture observes.
    fn state_machine(&self) -> &dyn StateMachine<E>;

    fn is_condition_met(&self) -> bool;

    /// Whether `machine` is the bound instance.
    fn is_bound_to(&self, machine: &dyn StateMachine<E>) -> bool {
        same_machine(self.state_machine(), machine)
    }
}

/// Holds while the target's current state has the configured name.
pub struct StateJuncture<E: Event> {
    target: Arc<dyn StateMachine<E>>,
    state: String,
}

impl<E: Event> StateJuncture<E> {
    /// Watch `target` for the state named `state`.
    pub fn new<M>(target: Arc<M>, state: impl Into<String>) -> Self
    where
        M: StateMachine<E> + 'static,
    {
        Self {
            target,
            state: state.into(),
        }
    }

    /// Watch `target` for `state`, compared by name.
    pub fn for_state<M, S>(target: Arc<M>, state: &S) -> Self
    where
        M: StateMachine<E> + 'static,
        S: State<E>,
    {
        Self::new(target, state.name())
    }

    pub fn state(&self) -> &str {
        &self.state
    }
}

impl<E: Event> Juncture<E> for StateJuncture<E> {
    fn state_machine(&self) -> &dyn StateMachine<E> {
        self.target.as_ref()
    }

    fn is_condition_met(&self) -> bool {
        self.target.current_state_name().as_deref() == Some(self.state.as_str())
    }
}

/// Holds while the target's latest event satisfies a predicate.
pub struct EventJuncture<E: Event> {
    target: Arc<dyn StateMachine<E>>,
    guard: Guard<E>,
}

impl<E: Event> EventJuncture<E> {
    pub fn new<M, F>(target: Arc<M>, predicate: F) -> Self
    where
        M: StateMachine<E> + 'static,
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        Self {
            target,
            guard: Guard::new(predicate),
        }
    }
}

impl<E: Event> Juncture<E> for EventJuncture<E> {
    fn state_machine(&self) -> &dyn StateMachine<E> {
        self.target.as_ref()
    }

    fn is_condition_met(&self) -> bool {
        self.target
            .latest_event()
            .is_some_and(|event| self.guard.check(&event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::mock::{MockMachine, Probe};

    #[test]
    fn state_juncture_compares_current_state() {
        let machine = Arc::new(MockMachine::new("Fsm", "StateOne"));
        let one = StateJuncture::new(Arc::clone(&machine), "StateOne");
        let two = StateJuncture::new(Arc::clone(&machine), "StateTwo");

        assert!(one.is_condition_met());
        assert!(!two.is_condition_met());

        machine.set_state("StateTwo");
        assert!(!one.is_condition_met());
        assert!(two.is_condition_met());
    }

    #[test]
    fn event_juncture_applies_predicate_to_latest_event() {
        let machine = Arc::new(MockMachine::new("Fsm", "Any"));
        let juncture = EventJuncture::new(Arc::clone(&machine), |e: &Probe| e.0 == "Juncture");

        // No event yet
        assert!(!juncture.is_condition_met());

        machine.set_latest(Probe("Juncture"));
        assert!(juncture.is_condition_met());

        machine.set_latest(Probe("Combined"));
        assert!(!juncture.is_condition_met());
    }

    #[test]
    fn binding_is_by_identity_not_name() {
        let bound = Arc::new(MockMachine::new("Twin", "On"));
        let twin = Arc::new(MockMachine::new("Twin", "On"));
        let juncture = StateJuncture::new(Arc::clone(&bound), "On");

        assert!(juncture.is_bound_to(&*bound));
        assert!(!juncture.is_bound_to(&*twin));
        assert_eq!(juncture.state_machine().name(), "Twin");
        assert_eq!(juncture.state(), "On");
    }
}
