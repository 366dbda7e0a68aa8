//! The single-machine transition engine.
//!
//! A [`FiniteStateMachine`] computes its reachable states and events once,
//! at setup, then consumes events one at a time under its own lock.
//! Containers and junctures see machines through the object-safe
//! [`StateMachine`] trait so machines with different state types can share
//! one event pipeline.

mod error;
mod finite;

pub use error::{StateMachineError, TransitionError};
pub use finite::FiniteStateMachine;

use crate::core::Event;

/// Object-safe view of a state machine consuming events of type `E`.
pub trait StateMachine<E: Event>: Send + Sync {
    fn name(&self) -> &str;

    /// Consume one event. See [`FiniteStateMachine::input`].
    fn input(&self, event: E) -> Result<(), StateMachineError>;

    /// Every event the machine can accept in any of its states.
    fn input_events(&self) -> Vec<E>;

    /// Name of the current state, `None` before setup.
    fn current_state_name(&self) -> Option<String>;

    /// The last event that completed a transition.
    fn latest_event(&self) -> Option<E>;
}

/// Identity comparison between two machines.
///
/// Junctures and the container compare machines by address, never by name.
pub fn same_machine<E: Event>(a: &dyn StateMachine<E>, b: &dyn StateMachine<E>) -> bool {
    std::ptr::addr_eq(a, b)
}
