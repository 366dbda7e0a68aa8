//! Event-routing container.
//!
//! A [`StateMachineContainer`] owns a priority queue, shares a normal queue
//! with external producers, maps routing keys to owning machines and keeps
//! a registry of triggers. Each call to
//! [`deliver_next_event`](StateMachineContainer::deliver_next_event)
//! consumes exactly one event:
//!
//! 1. dequeue from the priority queue, else from the normal queue
//! 2. resolve the routing key and its owner (unowned events are dropped)
//! 3. attach an [`EventSender`] and hand the event to the owner
//! 4. let every trigger look at the owner; active ones post their event to
//!    the priority queue, spent ones are unregistered
//!
//! Registries are safe to mutate from any thread. The sequence above is not
//! atomic as a whole: priority-before-normal ordering holds per calling
//! thread only.

mod conveyor;
mod error;
mod key;

pub use conveyor::EventConveyor;
pub use error::DeliveryError;
pub use key::{ByEventName, ByVariant, EventKeyExtractor, KeyFn};

use crate::core::{Event, EventQueue, EventSender};
use crate::machine::{same_machine, StateMachine};
use crate::trigger::{Trigger, TriggerHandle};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Anything that can deliver queued events one at a time.
pub trait EventDispatcher {
    type Error;

    /// Deliver one event. `Ok(false)` means there was nothing to deliver.
    fn deliver_next_event(&self) -> Result<bool, Self::Error>;
}

type SharedTrigger<E> = Arc<Mutex<Box<dyn Trigger<E>>>>;

/// Container routing events to the machines that own them.
pub struct StateMachineContainer<E: Event, K: EventKeyExtractor<E> = ByEventName> {
    name: String,
    key_extractor: K,
    machines: DashMap<K::Key, Arc<dyn StateMachine<E>>>,
    triggers: DashMap<TriggerHandle, SharedTrigger<E>>,
    priority: EventQueue<E>,
    normal: EventQueue<E>,
}

impl<E: Event> StateMachineContainer<E, ByEventName> {
    /// Container routing by event name, draining `normal` after its own
    /// priority queue.
    pub fn new(name: impl Into<String>, normal: EventQueue<E>) -> Self {
        Self::with_key_extractor(name, normal, ByEventName)
    }
}

impl<E: Event, K: EventKeyExtractor<E>> StateMachineContainer<E, K> {
    pub fn with_key_extractor(name: impl Into<String>, normal: EventQueue<E>, key_extractor: K) -> Self {
        Self {
            name: name.into(),
            key_extractor,
            machines: DashMap::new(),
            triggers: DashMap::new(),
            priority: EventQueue::new(),
            normal,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn routing_key(&self, event: &E) -> K::Key {
        self.key_extractor.key(event)
    }

    /// Route every event `machine` can accept to it.
    ///
    /// A key already owned by another machine is taken over; the last
    /// registration wins.
    pub fn add_state_machine(&self, machine: Arc<dyn StateMachine<E>>) {
        for event in machine.input_events() {
            let key = self.routing_key(&event);
            if let Some(previous) = self.machines.insert(key.clone(), Arc::clone(&machine)) {
                if !same_machine(&*previous, &*machine) {
                    warn!(
                        container = %self.name,
                        ?key,
                        previous = previous.name(),
                        owner = machine.name(),
                        "routing key taken over by another state machine"
                    );
                }
            }
        }
        debug!(container = %self.name, machine = machine.name(), "added state machine");
    }

    /// Drop every routing entry owned by `machine`.
    pub fn remove_state_machine(&self, machine: &dyn StateMachine<E>) {
        self.machines
            .retain(|_, owner| !same_machine(&**owner, machine));
        debug!(container = %self.name, machine = machine.name(), "removed state machine");
    }

    /// Some registered machine with the given name (linear scan).
    pub fn find_state_machine(&self, name: &str) -> Option<Arc<dyn StateMachine<E>>> {
        self.machines
            .iter()
            .find(|entry| entry.value().name() == name)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Machine currently owning `event`'s routing key.
    pub fn owner_of(&self, event: &E) -> Option<Arc<dyn StateMachine<E>>> {
        self.machines
            .get(&self.routing_key(event))
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Deliver one event. Returns `Ok(false)` only when both queues are
    /// empty; an event nobody owns is dropped and still counts.
    ///
    /// When the owner fails, it is evicted from the container and the error
    /// is returned. Nothing is retried.
    pub fn deliver_next_event(&self) -> Result<bool, DeliveryError> {
        let Some(mut event) = self.priority.poll().or_else(|| self.normal.poll()) else {
            return Ok(false);
        };

        let Some(machine) = self.owner_of(&event) else {
            debug!(container = %self.name, event = event.name(), "dropped event without owner");
            return Ok(true);
        };

        self.attach_sender(&mut event);
        if let Err(source) = machine.input(event) {
            warn!(
                container = %self.name,
                machine = machine.name(),
                error = %source,
                "state machine failed, evicting it"
            );
            self.remove_state_machine(&*machine);
            return Err(DeliveryError::MachineFailed {
                container: self.name.clone(),
                machine: machine.name().to_string(),
                source,
            });
        }

        self.pull_active_triggers(&*machine);
        Ok(true)
    }

    /// Register `trigger` under `handle`, replacing any previous one.
    pub fn add_trigger<T>(&self, handle: impl Into<TriggerHandle>, trigger: T)
    where
        T: Trigger<E> + 'static,
    {
        let handle = handle.into();
        let trigger: Box<dyn Trigger<E>> = Box::new(trigger);
        debug!(container = %self.name, %handle, "added trigger");
        self.triggers.insert(handle, Arc::new(Mutex::new(trigger)));
    }

    /// Unregister a trigger. Returns whether one was registered.
    pub fn remove_trigger(&self, handle: &TriggerHandle) -> bool {
        self.triggers.remove(handle).is_some()
    }

    pub fn has_trigger(&self, handle: &TriggerHandle) -> bool {
        self.triggers.contains_key(handle)
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    /// Sender bound to this container's normal and priority queues.
    pub fn sender(&self) -> EventSender<E> {
        EventSender::new(self.normal.clone(), self.priority.clone())
    }

    /// Events waiting in both queues.
    pub fn pending_events(&self) -> usize {
        self.priority.len() + self.normal.len()
    }

    fn attach_sender(&self, event: &mut E) {
        if let Some(slot) = event.sender_slot() {
            slot.attach(self.sender());
        }
    }

    fn pull_active_triggers(&self, machine: &dyn StateMachine<E>) {
        // Evaluate outside the map: junctures lock their machine, and a
        // machine's hooks may register triggers.
        let registered: Vec<(TriggerHandle, SharedTrigger<E>)> = self
            .triggers
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect();

        for (handle, shared) in registered {
            let (mut event, done) = {
                let mut trigger = shared.lock();
                if !trigger.is_active(machine) {
                    continue;
                }
                (trigger.event().clone(), trigger.is_done())
            };

            self.attach_sender(&mut event);
            debug!(
                container = %self.name,
                %handle,
                machine = machine.name(),
                event = event.name(),
                "trigger fired"
            );
            self.priority.offer(event);

            // The handle may have been re-registered meanwhile
            if done
                && self
                    .triggers
                    .remove_if(&handle, |_, current| Arc::ptr_eq(current, &shared))
                    .is_some()
            {
                debug!(container = %self.name, %handle, "retired trigger");
            }
        }
    }
}

impl<E: Event, K: EventKeyExtractor<E>> EventDispatcher for StateMachineContainer<E, K> {
    type Error = DeliveryError;

    fn deliver_next_event(&self) -> Result<bool, DeliveryError> {
        StateMachineContainer::deliver_next_event(self)
    }
}

impl<E: Event, K: EventKeyExtractor<E>> fmt::Debug for StateMachineContainer<E, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachineContainer")
            .field("name", &self.name)
            .field("routing_keys", &self.machines.len())
            .field("triggers", &self.triggers.len())
            .field("priority", &self.priority)
            .field("normal", &self.normal)
            .finish()
    }
}
