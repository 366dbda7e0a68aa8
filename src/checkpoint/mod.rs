//! Checkpoint and resume for finite state machines.
//!
//! A checkpoint records names only: the machine, its current state, its
//! latest event and the closure computed at setup. Resuming looks those
//! names up in a freshly set-up machine of the same shape, so state and
//! event types need not be serializable themselves.

use crate::core::{Event, State};
use crate::machine::FiniteStateMachine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of one machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    pub machine: String,

    /// `None` when captured before setup
    pub current_state: Option<String>,

    pub latest_event: Option<String>,

    /// Reachable states, in discovery order
    pub states: Vec<String>,

    pub input_events: Vec<String>,
}

impl Checkpoint {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()
    }

    fn check_version(self) -> Result<Self, CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(self)
    }
}

impl<S: State<E>, E: Event> FiniteStateMachine<S, E> {
    /// Snapshot the machine's current position.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            machine: self.name().to_string(),
            current_state: self.current_state().map(|s| s.name().to_string()),
            latest_event: self.latest_event().map(|e| e.name().to_string()),
            states: self.states().iter().map(|s| s.name().to_string()).collect(),
            input_events: self.input_events().iter().map(|e| e.name().to_string()).collect(),
        }
    }

    /// Move a set-up machine to the position recorded in `checkpoint`.
    ///
    /// Names are resolved against this machine's closure. Nothing changes
    /// unless every name resolves. Neither `init` nor `on_entry` runs.
    pub fn resume(&self, checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        if checkpoint.machine != self.name() {
            return Err(CheckpointError::ValidationFailed(format!(
                "checkpoint belongs to '{}', not '{}'",
                checkpoint.machine,
                self.name()
            )));
        }
        if !self.is_set_up() {
            return Err(CheckpointError::ValidationFailed(format!(
                "state machine '{}' is not set up",
                self.name()
            )));
        }

        let Some(state_name) = checkpoint.current_state.as_deref() else {
            return Err(CheckpointError::ValidationFailed(
                "checkpoint has no current state".to_string(),
            ));
        };
        let state = self
            .states()
            .into_iter()
            .find(|s| s.name() == state_name)
            .ok_or_else(|| {
                CheckpointError::ValidationFailed(format!("unknown state '{state_name}'"))
            })?;

        let latest = match checkpoint.latest_event.as_deref() {
            None => None,
            Some(event_name) => Some(
                self.input_events()
                    .into_iter()
                    .find(|e| e.name() == event_name)
                    .ok_or_else(|| {
                        CheckpointError::ValidationFailed(format!("unknown event '{event_name}'"))
                    })?,
            ),
        };

        debug!(
            machine = %checkpoint.machine,
            checkpoint = %checkpoint.id,
            state = state_name,
            "resumed from checkpoint"
        );
        self.restore(state, latest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::TransitionError;

    #[derive(Clone, Debug, PartialEq)]
    enum Pump {
        Prime,
        Flow,
    }

    impl Event for Pump {
        fn name(&self) -> &str {
            match self {
                Self::Prime => "Prime",
                Self::Flow => "Flow",
            }
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    enum Well {
        Dry,
        Primed,
        Flowing,
    }

    impl State<Pump> for Well {
        fn name(&self) -> &str {
            match self {
                Self::Dry => "Dry",
                Self::Primed => "Primed",
                Self::Flowing => "Flowing",
            }
        }

        fn on_transition(&self, event: &Pump) -> Result<Self, TransitionError> {
            match (self, event) {
                (Self::Dry, Pump::Prime) => Ok(Self::Primed),
                (Self::Primed, Pump::Flow) => Ok(Self::Flowing),
                _ => Err(TransitionError::rejected(event, "pump is stuck")),
            }
        }

        fn transition_states(&self) -> Vec<Self> {
            match self {
                Self::Dry => vec![Self::Primed],
                Self::Primed => vec![Self::Flowing],
                Self::Flowing => vec![],
            }
        }

        fn input_events(&self) -> Vec<Pump> {
            match self {
                Self::Dry => vec![Pump::Prime],
                Self::Primed => vec![Pump::Flow],
                Self::Flowing => vec![],
            }
        }
    }

    fn well(name: &str) -> FiniteStateMachine<Well, Pump> {
        let mut fsm = FiniteStateMachine::new(name);
        fsm.setup(Well::Dry).unwrap();
        fsm
    }

    #[test]
    fn checkpoint_records_names() {
        let fsm = well("Well");
        fsm.input(Pump::Prime).unwrap();

        let checkpoint = fsm.checkpoint();
        assert_eq!(checkpoint.version, CHECKPOINT_VERSION);
        assert_eq!(checkpoint.machine, "Well");
        assert_eq!(checkpoint.current_state.as_deref(), Some("Primed"));
        assert_eq!(checkpoint.latest_event.as_deref(), Some("Prime"));
        assert_eq!(checkpoint.states, vec!["Dry", "Primed", "Flowing"]);
        assert_eq!(checkpoint.input_events, vec!["Prime", "Flow"]);
    }

    #[test]
    fn checkpoints_get_unique_ids() {
        let fsm = well("Well");
        assert_ne!(fsm.checkpoint().id, fsm.checkpoint().id);
    }

    #[test]
    fn resume_restores_state_and_latest_event() {
        let original = well("Well");
        original.input(Pump::Prime).unwrap();
        let checkpoint = original.checkpoint();

        let restored = well("Well");
        restored.resume(&checkpoint).unwrap();

        assert_eq!(restored.current_state(), Some(Well::Primed));
        assert_eq!(restored.latest_event(), Some(Pump::Prime));

        restored.input(Pump::Flow).unwrap();
        assert_eq!(restored.current_state(), Some(Well::Flowing));
    }

    #[test]
    fn json_and_binary_preserve_the_checkpoint() {
        let fsm = well("Well");
        fsm.input(Pump::Prime).unwrap();
        let checkpoint = fsm.checkpoint();

        let json = checkpoint.to_json().unwrap();
        assert_eq!(Checkpoint::from_json(&json).unwrap(), checkpoint);

        let bytes = checkpoint.to_binary().unwrap();
        assert_eq!(Checkpoint::from_binary(&bytes).unwrap(), checkpoint);
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut checkpoint = well("Well").checkpoint();
        checkpoint.version = CHECKPOINT_VERSION + 1;

        let json = checkpoint.to_json().unwrap();
        assert!(matches!(
            Checkpoint::from_json(&json),
            Err(CheckpointError::UnsupportedVersion { found, supported })
                if found == CHECKPOINT_VERSION + 1 && supported == CHECKPOINT_VERSION
        ));
        assert!(matches!(
            well("Well").resume(&checkpoint),
            Err(CheckpointError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn garbage_fails_to_deserialize() {
        assert!(matches!(
            Checkpoint::from_json("{not json"),
            Err(CheckpointError::DeserializationFailed(_))
        ));
        assert!(matches!(
            Checkpoint::from_binary(&[1, 2, 3]),
            Err(CheckpointError::DeserializationFailed(_))
        ));
    }

    #[test]
    fn resume_validates_names() {
        let checkpoint = well("Well").checkpoint();

        let other = well("Cistern");
        assert!(matches!(
            other.resume(&checkpoint),
            Err(CheckpointError::ValidationFailed(_))
        ));

        let mut unknown_state = checkpoint.clone();
        unknown_state.current_state = Some("Flooded".into());
        let fsm = well("Well");
        assert!(matches!(
            fsm.resume(&unknown_state),
            Err(CheckpointError::ValidationFailed(_))
        ));
        assert_eq!(fsm.current_state(), Some(Well::Dry));

        let mut unknown_event = checkpoint;
        unknown_event.latest_event = Some("Drain".into());
        assert!(matches!(
            fsm.resume(&unknown_event),
            Err(CheckpointError::ValidationFailed(_))
        ));
    }

    #[test]
    fn resume_requires_setup() {
        let checkpoint = well("Well").checkpoint();
        let fresh: FiniteStateMachine<Well, Pump> = FiniteStateMachine::new("Well");
        assert!(matches!(
            fresh.resume(&checkpoint),
            Err(CheckpointError::ValidationFailed(_))
        ));
    }
}
