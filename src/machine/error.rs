//! Errors raised by states and by the transition engine.

use crate::core::Event;
use thiserror::Error;

/// Failure reported by a state's `on_transition` or `on_entry`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransitionError {
    #[error("Event '{event}' rejected: {reason}")]
    Rejected { event: String, reason: String },

    #[error("Transition action failed: {0}")]
    ActionFailed(String),
}

impl TransitionError {
    /// Reject `event` with a reason.
    pub fn rejected<E: Event>(event: &E, reason: impl Into<String>) -> Self {
        Self::Rejected {
            event: event.name().to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors produced by a [`FiniteStateMachine`](super::FiniteStateMachine).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StateMachineError {
    #[error("State machine '{machine}' has not been set up. Call .setup(state) first")]
    NotSetUp { machine: String },

    #[error("State machine '{machine}' is already set up")]
    AlreadySetUp { machine: String },

    #[error("State machine '{machine}': transition out of '{state}' on '{event}' failed: {source}")]
    Transition {
        machine: String,
        state: String,
        event: String,
        #[source]
        source: TransitionError,
    },

    #[error("State machine '{machine}': entry into '{state}' on '{event}' failed: {source}")]
    Entry {
        machine: String,
        state: String,
        event: String,
        #[source]
        source: TransitionError,
    },
}

impl StateMachineError {
    /// Name of the machine that raised the error.
    pub fn machine(&self) -> &str {
        match self {
            Self::NotSetUp { machine }
            | Self::AlreadySetUp { machine }
            | Self::Transition { machine, .. }
            | Self::Entry { machine, .. } => machine,
        }
    }
}
