//! Core State trait for state machine states.
//!
//! A state owns its transition function and declares which states it can
//! move to and which events it accepts. Machines compute their closure from
//! these declarations once, at setup.

use super::event::Event;
use crate::machine::TransitionError;

/// Trait for state machine states.
///
/// States are identified by name. `on_transition` and `on_entry` may carry
/// side effects (a coin box, a credit tally, posting follow-up events) and
/// may fail; everything else must be a pure read of the declaration.
///
/// # Example
///
/// ```rust
/// use junction::core::{Event, State};
/// use junction::machine::TransitionError;
///
/// #[derive(Clone, Debug)]
/// enum Switch {
///     Flip,
/// }
///
/// impl Event for Switch {
///     fn name(&self) -> &str {
///         "Flip"
///     }
/// }
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum Lamp {
///     On,
///     Off,
/// }
///
/// impl State<Switch> for Lamp {
///     fn name(&self) -> &str {
///         match self {
///             Self::On => "On",
///             Self::Off => "Off",
///         }
///     }
///
///     fn on_transition(&self, _event: &Switch) -> Result<Self, TransitionError> {
///         Ok(match self {
///             Self::On => Self::Off,
///             Self::Off => Self::On,
///         })
///     }
///
///     fn transition_states(&self) -> Vec<Self> {
///         match self {
///             Self::On => vec![Self::Off],
///             Self::Off => vec![Self::On],
///         }
///     }
///
///     fn input_events(&self) -> Vec<Switch> {
///         vec![Switch::Flip]
///     }
/// }
///
/// assert!(Lamp::Off.accepts(&Switch::Flip));
/// assert_eq!(Lamp::Off.on_transition(&Switch::Flip).unwrap(), Lamp::On);
/// ```
pub trait State<E: Event>: Clone + Send + Sync + 'static {
    /// Identity of the state within its machine.
    fn name(&self) -> &str;

    /// One-time initializer, called during setup in discovery order and
    /// before the declared sets are read.
    fn init(&self) {}

    /// Runs after the machine has committed to this state.
    fn on_entry(&self, _event: &E) -> Result<(), TransitionError> {
        Ok(())
    }

    /// Compute the next state for an accepted event.
    fn on_transition(&self, event: &E) -> Result<Self, TransitionError>;

    /// States this state may transition to.
    fn transition_states(&self) -> Vec<Self>;

    /// Events this state accepts. Anything else is ignored by the machine.
    fn input_events(&self) -> Vec<E>;

    /// Whether `event` belongs to this state's input alphabet.
    fn accepts(&self, event: &E) -> bool {
        self.input_events()
            .iter()
            .any(|accepted| accepted.same_name(event))
    }
}
