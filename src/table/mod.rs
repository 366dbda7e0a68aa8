//! Table-driven states.
//!
//! Enum-encoded machines are described by a closed set of state tags and an
//! explicit transition table keyed by (state tag, event name). The table is
//! validated and built once; every [`TableState`] shares it.
//!
//! # Example
//!
//! ```rust
//! use junction::machine::FiniteStateMachine;
//! use junction::table::{TableState, TransitionTable};
//! use junction::{event_enum, state_tags};
//! use std::sync::Arc;
//!
//! state_tags! {
//!     enum Door {
//!         Open,
//!         Closed,
//!     }
//! }
//!
//! event_enum! {
//!     enum Push {
//!         OpenIt,
//!         CloseIt,
//!     }
//! }
//!
//! let table = TransitionTable::builder()
//!     .on(Door::Closed, Push::OpenIt, Door::Open)
//!     .on(Door::Open, Push::CloseIt, Door::Closed)
//!     .build()
//!     .ok()
//!     .unwrap();
//! let table = Arc::new(table);
//!
//! let mut machine = FiniteStateMachine::new("Door");
//! machine.setup(TableState::new(Door::Closed, &table)).unwrap();
//! machine.input(Push::OpenIt).unwrap();
//!
//! assert_eq!(machine.current_state().map(|s| s.tag()), Some(Door::Open));
//! ```

mod builder;
mod error;
mod macros;

pub use builder::TransitionTableBuilder;
pub use error::TableError;

use crate::core::{Event, State};
use crate::machine::TransitionError;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::sync::Arc;

/// Closed, copyable identifier of a table-driven state.
///
/// Usually generated with [`state_tags!`](crate::state_tags).
pub trait StateTag: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    fn name(&self) -> &'static str;
}

/// Action run when a table-driven machine enters a state.
pub type EntryAction<E> = Arc<dyn Fn(&E) -> Result<(), TransitionError> + Send + Sync>;

/// Transition rows keyed by (state tag, event name).
pub struct TransitionTable<T: StateTag, E: Event> {
    pub(crate) rows: HashMap<(T, String), T>,
    pub(crate) alphabets: HashMap<T, Vec<E>>,
    pub(crate) targets: HashMap<T, Vec<T>>,
    pub(crate) entry_actions: HashMap<T, EntryAction<E>>,
}

impl<T: StateTag, E: Event> TransitionTable<T, E> {
    pub fn builder() -> TransitionTableBuilder<T, E> {
        TransitionTableBuilder::new()
    }

    /// Target of the row for `from` on `event`, if there is one.
    pub fn next(&self, from: T, event: &E) -> Option<T> {
        self.rows.get(&(from, event.name().to_string())).copied()
    }

    /// Events with a row out of `state`, in insertion order.
    pub fn alphabet(&self, state: T) -> &[E] {
        self.alphabets.get(&state).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Distinct targets reachable in one step from `state`.
    pub fn targets(&self, state: T) -> &[T] {
        self.targets.get(&state).map(Vec::as_slice).unwrap_or(&[])
    }

    /// State `tag` driven by this table.
    pub fn start(self: &Arc<Self>, tag: T) -> TableState<T, E> {
        TableState::new(tag, self)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T: StateTag, E: Event> Debug for TransitionTable<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionTable")
            .field("rows", &self.rows)
            .finish()
    }
}

/// A state tag paired with the table that drives it.
pub struct TableState<T: StateTag, E: Event> {
    tag: T,
    table: Arc<TransitionTable<T, E>>,
}

impl<T: StateTag, E: Event> TableState<T, E> {
    pub fn new(tag: T, table: &Arc<TransitionTable<T, E>>) -> Self {
        Self {
            tag,
            table: Arc::clone(table),
        }
    }

    pub fn tag(&self) -> T {
        self.tag
    }

    fn with_tag(&self, tag: T) -> Self {
        Self::new(tag, &self.table)
    }
}

impl<T: StateTag, E: Event> Clone for TableState<T, E> {
    fn clone(&self) -> Self {
        self.with_tag(self.tag)
    }
}

impl<T: StateTag, E: Event> PartialEq for TableState<T, E> {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
    }
}

impl<T: StateTag, E: Event> Debug for TableState<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TableState").field(&self.tag).finish()
    }
}

impl<T: StateTag, E: Event> State<E> for TableState<T, E> {
    fn name(&self) -> &str {
        self.tag.name()
    }

    fn on_entry(&self, event: &E) -> Result<(), TransitionError> {
        match self.table.entry_actions.get(&self.tag) {
            Some(action) => action(event),
            None => Ok(()),
        }
    }

    fn on_transition(&self, event: &E) -> Result<Self, TransitionError> {
        self.table
            .next(self.tag, event)
            .map(|tag| self.with_tag(tag))
            .ok_or_else(|| {
                TransitionError::rejected(
                    event,
                    format!("no row out of '{}'", self.tag.name()),
                )
            })
    }

    fn transition_states(&self) -> Vec<Self> {
        self.table
            .targets(self.tag)
            .iter()
            .map(|&tag| self.with_tag(tag))
            .collect()
    }

    fn input_events(&self) -> Vec<E> {
        self.table.alphabet(self.tag).to_vec()
    }

    fn accepts(&self, event: &E) -> bool {
        self.table.next(self.tag, event).is_some()
    }
}
