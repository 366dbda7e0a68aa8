//! Routing-key policies.
//!
//! A container maps every event to a key and every key to at most one
//! owning machine. The policy decides how coarse that mapping is.

use crate::core::Event;
use std::fmt::Debug;
use std::hash::Hash;
use std::mem::Discriminant;

/// Per-container policy mapping an event to its routing key.
pub trait EventKeyExtractor<E: Event>: Send + Sync {
    type Key: Eq + Hash + Clone + Debug + Send + Sync + 'static;

    fn key(&self, event: &E) -> Self::Key;
}

/// Route by event name. Two machines accepting the same name collide.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByEventName;

impl<E: Event> EventKeyExtractor<E> for ByEventName {
    type Key = String;

    fn key(&self, event: &E) -> String {
        event.name().to_string()
    }
}

/// Route by enum variant, ignoring payload and name: every `Coin(_)` goes
/// to the same machine whatever coin it carries.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByVariant;

impl<E: Event> EventKeyExtractor<E> for ByVariant {
    type Key = Discriminant<E>;

    fn key(&self, event: &E) -> Discriminant<E> {
        std::mem::discriminant(event)
    }
}

/// Route with a caller-supplied function.
#[derive(Clone, Copy, Debug)]
pub struct KeyFn<F>(pub F);

impl<E, K, F> EventKeyExtractor<E> for KeyFn<F>
where
    E: Event,
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    F: Fn(&E) -> K + Send + Sync,
{
    type Key = K;

    fn key(&self, event: &E) -> K {
        (self.0)(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    enum Till {
        Coin(u32),
        Refund,
    }

    impl Event for Till {
        fn name(&self) -> &str {
            match self {
                Self::Coin(5) => "Nickel",
                Self::Coin(10) => "Dime",
                Self::Coin(_) => "Coin",
                Self::Refund => "Refund",
            }
        }
    }

    #[test]
    fn by_name_distinguishes_names() {
        let keys = ByEventName;
        assert_eq!(keys.key(&Till::Coin(5)), "Nickel");
        assert_ne!(keys.key(&Till::Coin(5)), keys.key(&Till::Coin(10)));
    }

    #[test]
    fn by_variant_groups_payloads() {
        let keys = ByVariant;
        assert_eq!(keys.key(&Till::Coin(5)), keys.key(&Till::Coin(10)));
        assert_ne!(keys.key(&Till::Coin(5)), keys.key(&Till::Refund));
    }

    #[test]
    fn key_fn_uses_the_closure() {
        let keys = KeyFn(|event: &Till| matches!(event, Till::Refund));
        assert!(keys.key(&Till::Refund));
        assert!(!keys.key(&Till::Coin(25)));
    }
}
