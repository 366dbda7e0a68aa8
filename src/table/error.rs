//! Validation errors for transition tables.

use thiserror::Error;

/// Problems found while validating a transition table.
///
/// The builder reports every problem at once rather than stopping at the
/// first one.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TableError {
    #[error("No transitions defined. Add at least one row with .on(from, event, to)")]
    Empty,

    #[error(
        "Conflicting rows for state '{state}' on event '{event}': '{existing}' and '{requested}'"
    )]
    ConflictingTransition {
        state: String,
        event: String,
        existing: String,
        requested: String,
    },
}
