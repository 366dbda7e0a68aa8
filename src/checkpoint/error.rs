//! Checkpoint errors.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckpointError {
    #[error("Checkpoint serialization failed: {0}")]
    SerializationFailed(String),

    #[error("Checkpoint deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Written by a newer or older format
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The checkpoint does not fit the machine it is resumed into
    #[error("Checkpoint does not match state machine: {0}")]
    ValidationFailed(String),
}
