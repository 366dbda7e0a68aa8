//! Junctures and triggers.
//!
//! A [`Juncture`] is a read-only condition over one specific machine. A
//! [`Trigger`] wraps a juncture and decides, each time the container has
//! delivered an event to some machine, whether to emit a synthetic event.
//! Emitted events go to the container's priority queue.
//!
//! Three trigger flavors are provided:
//! - [`OneTimeTrigger`]: fires the first time its juncture holds, then is done
//! - [`RepeatingTrigger`]: fires every time its juncture holds, never done
//! - [`FlipFlopTrigger`]: alternates between a first and a second event

mod flip_flop;
mod juncture;
#[cfg(test)]
pub(crate) mod mock;
mod one_time;
mod repeating;

pub use flip_flop::{FlipFlopPhase, FlipFlopTrigger};
pub use juncture::{EventJuncture, Juncture, StateJuncture};
pub use one_time::OneTimeTrigger;
pub use repeating::RepeatingTrigger;

use crate::core::Event;
use crate::machine::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stateful rule emitting an event when its juncture holds.
///
/// Implementations never fail; their effects are confined to their own
/// flags. A trigger emits at most one event per call to `is_active`.
pub trait Trigger<E: Event>: Send + Sync {
    /// Evaluate the rule after `machine` consumed an event. `true` means
    /// [`event`](Self::event) should be posted now.
    fn is_active(&mut self, machine: &dyn StateMachine<E>) -> bool;

    /// Whether the trigger will never fire again and can be unregistered.
    fn is_done(&self) -> bool;

    /// Event to post when active.
    fn event(&self) -> &E;
}

/// Registration key of a trigger inside a container.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerHandle(String);

impl TriggerHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// A fresh handle that will not collide with any other generated one.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TriggerHandle {
    fn from(handle: &str) -> Self {
        Self::new(handle)
    }
}

impl From<String> for TriggerHandle {
    fn from(handle: String) -> Self {
        Self(handle)
    }
}

impl From<u64> for TriggerHandle {
    fn from(handle: u64) -> Self {
        Self(handle.to_string())
    }
}

impl fmt::Display for TriggerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
