//! Finite state machine driven by declared states and events.

use super::error::StateMachineError;
use super::StateMachine;
use crate::core::{Event, State};
use parking_lot::Mutex;
use std::collections::{HashSet, VecDeque};
use std::fmt;
use tracing::{debug, trace, warn};

/// Mutable part of a machine, guarded by the per-machine lock.
struct Runtime<S, E> {
    current: Option<S>,
    latest: Option<E>,
}

/// A single automaton: closure sets fixed at setup, current state and
/// latest event behind one exclusive lock.
///
/// # Example
///
/// ```rust
/// use junction::core::{Event, State};
/// use junction::machine::{FiniteStateMachine, TransitionError};
///
/// #[derive(Clone, Debug)]
/// struct Tick;
///
/// impl Event for Tick {
///     fn name(&self) -> &str {
///         "Tick"
///     }
/// }
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum Phase {
///     Even,
///     Odd,
/// }
///
/// impl State<Tick> for Phase {
///     fn name(&self) -> &str {
///         match self {
///             Self::Even => "Even",
///             Self::Odd => "Odd",
///         }
///     }
///
///     fn on_transition(&self, _event: &Tick) -> Result<Self, TransitionError> {
///         Ok(match self {
///             Self::Even => Self::Odd,
///             Self::Odd => Self::Even,
///         })
///     }
///
///     fn transition_states(&self) -> Vec<Self> {
///         vec![Self::Even, Self::Odd]
///     }
///
///     fn input_events(&self) -> Vec<Tick> {
///         vec![Tick]
///     }
/// }
///
/// let mut machine = FiniteStateMachine::new("Parity");
/// machine.setup(Phase::Even).unwrap();
/// machine.input(Tick).unwrap();
///
/// assert_eq!(machine.current_state(), Some(Phase::Odd));
/// assert_eq!(machine.states().len(), 2);
/// ```
pub struct FiniteStateMachine<S, E> {
    name: String,
    states: Vec<S>,
    input_events: Vec<E>,
    runtime: Mutex<Runtime<S, E>>,
}

impl<S: State<E>, E: Event> FiniteStateMachine<S, E> {
    /// Create a machine that still needs [`setup`](Self::setup).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: Vec::new(),
            input_events: Vec::new(),
            runtime: Mutex::new(Runtime {
                current: None,
                latest: None,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Compute the closure reachable from `start` and enter it.
    ///
    /// States are visited breadth-first over their declared transition
    /// targets, each exactly once; `init` runs on each in discovery order.
    /// A machine can be set up only once.
    pub fn setup(&mut self, start: S) -> Result<(), StateMachineError> {
        let runtime = self.runtime.get_mut();
        if runtime.current.is_some() {
            return Err(StateMachineError::AlreadySetUp {
                machine: self.name.clone(),
            });
        }

        let (states, input_events) = closure_of(&start);
        debug!(
            machine = %self.name,
            start = start.name(),
            states = states.len(),
            events = input_events.len(),
            "state machine set up"
        );

        runtime.current = Some(start);
        self.states = states;
        self.input_events = input_events;
        Ok(())
    }

    pub fn is_set_up(&self) -> bool {
        self.runtime.lock().current.is_some()
    }

    /// Consume one event.
    ///
    /// Events outside the current state's alphabet are ignored. Otherwise
    /// the current state computes the next one, the machine commits to it,
    /// then the new state's `on_entry` runs. An entry failure leaves the
    /// machine in the new state with the latest event unchanged.
    pub fn input(&self, event: E) -> Result<(), StateMachineError> {
        let mut runtime = self.runtime.lock();
        let Some(current) = runtime.current.as_ref() else {
            return Err(StateMachineError::NotSetUp {
                machine: self.name.clone(),
            });
        };

        if !current.accepts(&event) {
            trace!(
                machine = %self.name,
                state = current.name(),
                event = event.name(),
                "event not accepted by current state"
            );
            return Ok(());
        }

        let next = current
            .on_transition(&event)
            .map_err(|source| StateMachineError::Transition {
                machine: self.name.clone(),
                state: current.name().to_string(),
                event: event.name().to_string(),
                source,
            })?;

        if !self.states.iter().any(|state| state.name() == next.name()) {
            warn!(
                machine = %self.name,
                state = next.name(),
                "transition target is outside the closure computed at setup"
            );
        }
        debug!(
            machine = %self.name,
            from = current.name(),
            to = next.name(),
            event = event.name(),
            "transition"
        );

        let entered = runtime.current.insert(next);
        entered
            .on_entry(&event)
            .map_err(|source| StateMachineError::Entry {
                machine: self.name.clone(),
                state: entered.name().to_string(),
                event: event.name().to_string(),
                source,
            })?;

        runtime.latest = Some(event);
        Ok(())
    }

    pub fn current_state(&self) -> Option<S> {
        self.runtime.lock().current.clone()
    }

    pub fn latest_event(&self) -> Option<E> {
        self.runtime.lock().latest.clone()
    }

    /// Copy of every state reachable from the start state.
    pub fn states(&self) -> Vec<S> {
        self.states.clone()
    }

    /// Copy of every event accepted by some reachable state.
    pub fn input_events(&self) -> Vec<E> {
        self.input_events.clone()
    }

    /// Overwrite current state and latest event. Used when resuming from a
    /// checkpoint; callers pick values from the closure.
    pub(crate) fn restore(&self, current: S, latest: Option<E>) {
        let mut runtime = self.runtime.lock();
        runtime.current = Some(current);
        runtime.latest = latest;
    }
}

/// Breadth-first closure over declared transition targets.
fn closure_of<S: State<E>, E: Event>(start: &S) -> (Vec<S>, Vec<E>) {
    let mut visited: HashSet<String> = HashSet::new();
    let mut seen_events: HashSet<String> = HashSet::new();
    let mut states = Vec::new();
    let mut events = Vec::new();
    let mut worklist = VecDeque::new();

    visited.insert(start.name().to_string());
    worklist.push_back(start.clone());

    while let Some(state) = worklist.pop_front() {
        state.init();

        for event in state.input_events() {
            if seen_events.insert(event.name().to_string()) {
                events.push(event);
            }
        }
        for successor in state.transition_states() {
            if visited.insert(successor.name().to_string()) {
                worklist.push_back(successor);
            }
        }
        states.push(state);
    }

    (states, events)
}

impl<S: State<E>, E: Event> StateMachine<E> for FiniteStateMachine<S, E> {
    fn name(&self) -> &str {
        &self.name
    }

    fn input(&self, event: E) -> Result<(), StateMachineError> {
        FiniteStateMachine::input(self, event)
    }

    fn input_events(&self) -> Vec<E> {
        self.input_events.clone()
    }

    fn current_state_name(&self) -> Option<String> {
        self.runtime
            .lock()
            .current
            .as_ref()
            .map(|state| state.name().to_string())
    }

    fn latest_event(&self) -> Option<E> {
        FiniteStateMachine::latest_event(self)
    }
}

impl<S, E> fmt::Display for FiniteStateMachine<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<S, E> fmt::Debug for FiniteStateMachine<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FiniteStateMachine")
            .field("name", &self.name)
            .field("states", &self.states.len())
            .field("input_events", &self.input_events.len())
            .finish()
    }
}
