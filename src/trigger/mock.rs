//! Hand-driven machine for juncture and trigger tests.

use crate::core::Event;
use crate::machine::{StateMachine, StateMachineError};
use parking_lot::Mutex;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Probe(pub &'static str);

impl Event for Probe {
    fn name(&self) -> &str {
        self.0
    }
}

/// Machine whose observable state is set directly by the test.
pub(crate) struct MockMachine {
    name: String,
    state: Mutex<Option<String>>,
    latest: Mutex<Option<Probe>>,
}

impl MockMachine {
    pub(crate) fn new(name: &str, state: &str) -> Self {
        Self {
            name: name.to_string(),
            state: Mutex::new(Some(state.to_string())),
            latest: Mutex::new(None),
        }
    }

    pub(crate) fn set_state(&self, state: &str) {
        *self.state.lock() = Some(state.to_string());
    }

    pub(crate) fn set_latest(&self, event: Probe) {
        *self.latest.lock() = Some(event);
    }
}

impl StateMachine<Probe> for MockMachine {
    fn name(&self) -> &str {
        &self.name
    }

    fn input(&self, event: Probe) -> Result<(), StateMachineError> {
        self.set_latest(event);
        Ok(())
    }

    fn input_events(&self) -> Vec<Probe> {
        Vec::new()
    }

    fn current_state_name(&self) -> Option<String> {
        self.state.lock().clone()
    }

    fn latest_event(&self) -> Option<Probe> {
        self.latest.lock().clone()
    }
}
