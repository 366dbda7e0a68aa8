//! Delivery errors.

use crate::machine::StateMachineError;
use thiserror::Error;

/// Failure surfaced by [`deliver_next_event`](super::StateMachineContainer::deliver_next_event).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DeliveryError {
    /// The owning machine failed its transition and has been evicted.
    #[error("State machine '{machine}' failed and was evicted from '{container}': {source}")]
    MachineFailed {
        container: String,
        machine: String,
        #[source]
        source: StateMachineError,
    },
}
