//! Two-phase trigger alternating between two events.

use super::{Juncture, Trigger};
use crate::core::Event;
use crate::machine::StateMachine;

/// Phase of a [`FlipFlopTrigger`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipFlopPhase {
    /// Waiting for the juncture to hold.
    Inactive,
    /// The first event has been emitted.
    Active,
}

/// Edge detector over a juncture.
///
/// - inactive and the juncture holds: emit the first event, go active
/// - the juncture does not hold: emit the second event, go inactive
/// - active and the juncture holds: nothing
///
/// The second event is emitted on every cycle the juncture reads false,
/// including while already inactive, not only on the falling edge.
pub struct FlipFlopTrigger<E: Event, J: Juncture<E>> {
    first_event: E,
    second_event: E,
    juncture: J,
    phase: FlipFlopPhase,
    emitting_first: bool,
}

impl<E: Event, J: Juncture<E>> FlipFlopTrigger<E, J> {
    pub fn new(first_event: E, second_event: E, juncture: J) -> Self {
        Self {
            first_event,
            second_event,
            juncture,
            phase: FlipFlopPhase::Inactive,
            emitting_first: true,
        }
    }

    pub fn phase(&self) -> FlipFlopPhase {
        self.phase
    }
}

impl<E: Event, J: Juncture<E>> Trigger<E> for FlipFlopTrigger<E, J> {
    fn is_active(&mut self, machine: &dyn StateMachine<E>) -> bool {
        if !self.juncture.is_bound_to(machine) {
            return false;
        }

        match (self.phase, self.juncture.is_condition_met()) {
            (FlipFlopPhase::Inactive, true) => {
                self.phase = FlipFlopPhase::Active;
                self.emitting_first = true;
                true
            }
            (_, false) => {
                self.phase = FlipFlopPhase::Inactive;
                self.emitting_first = false;
                true
            }
            (FlipFlopPhase::Active, true) => false,
        }
    }

    fn is_done(&self) -> bool {
        false
    }

    fn event(&self) -> &E {
        if self.emitting_first {
            &self.first_event
        } else {
            &self.second_event
        }
    }
}
