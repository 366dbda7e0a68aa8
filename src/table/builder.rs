//! Builder for transition tables.

use super::error::TableError;
use super::{EntryAction, StateTag, TransitionTable};
use crate::core::Event;
use crate::machine::TransitionError;
use std::collections::HashMap;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Fluent builder for a [`TransitionTable`].
pub struct TransitionTableBuilder<T: StateTag, E: Event> {
    rows: Vec<(T, E, T)>,
    entry_actions: HashMap<T, EntryAction<E>>,
}

impl<T: StateTag, E: Event> TransitionTableBuilder<T, E> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            entry_actions: HashMap::new(),
        }
    }

    /// Add a row: in state `from`, `event` moves the machine to `to`.
    pub fn on(mut self, from: T, event: E, to: T) -> Self {
        self.rows.push((from, event, to));
        self
    }

    /// Run `action` whenever a machine enters `state`.
    pub fn on_entry<F>(mut self, state: T, action: F) -> Self
    where
        F: Fn(&E) -> Result<(), TransitionError> + Send + Sync + 'static,
    {
        self.entry_actions.insert(state, Arc::new(action));
        self
    }

    /// Validate every row and build the table.
    ///
    /// Repeating an identical row is allowed; two rows for the same state
    /// and event with different targets are not.
    pub fn build(self) -> Result<TransitionTable<T, E>, NonEmptyVec<TableError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<TableError>>> = Vec::new();

        if self.rows.is_empty() {
            checks.push(Validation::fail(TableError::Empty));
        }

        let mut table = TransitionTable {
            rows: HashMap::new(),
            alphabets: HashMap::new(),
            targets: HashMap::new(),
            entry_actions: self.entry_actions,
        };

        for (from, event, to) in self.rows {
            let key = (from, event.name().to_string());
            let check = match table.rows.get(&key) {
                Some(existing) if *existing != to => {
                    Validation::fail(TableError::ConflictingTransition {
                        state: from.name().to_string(),
                        event: key.1.clone(),
                        existing: existing.name().to_string(),
                        requested: to.name().to_string(),
                    })
                }
                Some(_) => Validation::success(()),
                None => {
                    table.rows.insert(key, to);
                    table.alphabets.entry(from).or_default().push(event);
                    let targets = table.targets.entry(from).or_default();
                    if !targets.contains(&to) {
                        targets.push(to);
                    }
                    Validation::success(())
                }
            };
            checks.push(check);
        }

        match Validation::all_vec(checks) {
            Validation::Success(_) => Ok(table),
            Validation::Failure(errors) => Err(errors),
        }
    }
}

impl<T: StateTag, E: Event> Default for TransitionTableBuilder<T, E> {
    fn default() -> Self {
        Self::new()
    }
}
