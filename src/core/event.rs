//! The Event contract consumed by machines and containers.
//!
//! Events are identified by name. Two events with the same name are the
//! same input as far as a state's alphabet and a container's routing are
//! concerned, whatever payload they carry.

use super::sender::EventSender;
use std::fmt::{self, Debug};

/// Trait for events delivered to state machines.
///
/// The name must be unique within one machine's input alphabet. Payload is
/// up to the implementor; a closed enum per choreography is the usual shape.
///
/// # Example
///
/// ```rust
/// use junction::core::Event;
///
/// #[derive(Clone, Debug)]
/// enum Door {
///     Open,
///     Close,
/// }
///
/// impl Event for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Close => "Close",
///         }
///     }
/// }
///
/// assert_eq!(Door::Open.name(), "Open");
/// ```
pub trait Event: Clone + Debug + Send + Sync + 'static {
    /// Routing-significant identity of the event.
    fn name(&self) -> &str;

    /// Capability accessor for events that carry an [`EventSender`].
    ///
    /// Containers call this right before delivery and fill the slot with a
    /// sender bound to their queues. Default: the event carries no slot.
    fn sender_slot(&mut self) -> Option<&mut SenderSlot<Self>> {
        None
    }

    /// Name equality, the identity used for alphabets and closures.
    fn same_name(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

/// Mutable slot holding an optional [`EventSender`].
///
/// The slot never takes part in event equality: two events differing only
/// in their attached sender compare equal.
pub struct SenderSlot<E> {
    sender: Option<EventSender<E>>,
}

impl<E> SenderSlot<E> {
    /// An empty slot.
    pub fn new() -> Self {
        Self { sender: None }
    }

    /// Attach (or replace) the sender.
    pub fn attach(&mut self, sender: EventSender<E>) {
        self.sender = Some(sender);
    }

    /// The attached sender, if the event has been through a container.
    pub fn get(&self) -> Option<&EventSender<E>> {
        self.sender.as_ref()
    }

    pub fn is_attached(&self) -> bool {
        self.sender.is_some()
    }
}

impl<E> Default for SenderSlot<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for SenderSlot<E> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<E> PartialEq for SenderSlot<E> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<E> Eq for SenderSlot<E> {}

impl<E> Debug for SenderSlot<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_attached() {
            f.write_str("SenderSlot(attached)")
        } else {
            f.write_str("SenderSlot(empty)")
        }
    }
}

/// Produces events of one choreography from a caller-chosen kind.
pub trait EventFactory<K> {
    type Event: Event;

    fn new_event(&self, kind: K) -> Self::Event;
}
