//! Junction: event-driven finite state machines with reactive triggers
//!
//! Independent machines share one event pipeline. A container routes each
//! event to the machine owning it, lets that machine take one transition,
//! then asks every registered trigger whether the machine's new situation
//! calls for a synthetic event. Synthetic events jump the queue.
//!
//! # Core Concepts
//!
//! - **State**: a named node owning its transition function and declaring
//!   which states and events it can reach
//! - **FiniteStateMachine**: computes the reachable closure once at setup,
//!   then consumes events one at a time
//! - **StateMachineContainer**: routes events by key and drains a priority
//!   queue ahead of a normal one
//! - **Trigger** / **Juncture**: conditions over one machine that emit
//!   events when they hold
//! - **EventSender**: lets a state post follow-up events from inside a
//!   transition
//!
//! # Example
//!
//! ```rust
//! use junction::container::StateMachineContainer;
//! use junction::core::{Event, EventQueue, State};
//! use junction::machine::{FiniteStateMachine, TransitionError};
//! use std::sync::Arc;
//!
//! #[derive(Clone, Debug)]
//! struct Toggle;
//!
//! impl Event for Toggle {
//!     fn name(&self) -> &str {
//!         "Toggle"
//!     }
//! }
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Light {
//!     On,
//!     Off,
//! }
//!
//! impl State<Toggle> for Light {
//!     fn name(&self) -> &str {
//!         match self {
//!             Self::On => "On",
//!             Self::Off => "Off",
//!         }
//!     }
//!
//!     fn on_transition(&self, _event: &Toggle) -> Result<Self, TransitionError> {
//!         Ok(match self {
//!             Self::On => Self::Off,
//!             Self::Off => Self::On,
//!         })
//!     }
//!
//!     fn transition_states(&self) -> Vec<Self> {
//!         vec![Self::On, Self::Off]
//!     }
//!
//!     fn input_events(&self) -> Vec<Toggle> {
//!         vec![Toggle]
//!     }
//! }
//!
//! let queue: EventQueue<Toggle> = EventQueue::new();
//! let container = StateMachineContainer::new("Room", queue.clone());
//!
//! let mut lamp = FiniteStateMachine::new("Lamp");
//! lamp.setup(Light::Off).unwrap();
//! let lamp = Arc::new(lamp);
//! container.add_state_machine(lamp.clone());
//!
//! queue.offer(Toggle);
//! assert_eq!(container.deliver_next_event(), Ok(true));
//! assert_eq!(lamp.current_state(), Some(Light::On));
//! ```

pub mod checkpoint;
pub mod container;
pub mod core;
pub mod machine;
pub mod table;
pub mod trigger;

// Re-export commonly used types
pub use checkpoint::{Checkpoint, CheckpointError};
pub use container::{DeliveryError, EventConveyor, StateMachineContainer};
pub use crate::core::{Event, EventQueue, EventSender, Guard, State};
pub use machine::{FiniteStateMachine, StateMachine, StateMachineError, TransitionError};
pub use trigger::{
    FlipFlopTrigger, Juncture, OneTimeTrigger, RepeatingTrigger, StateJuncture, Trigger,
    TriggerHandle,
};
