//! Event queues and the sender capability bound to them.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// Shared FIFO of events.
///
/// Cloning yields another handle to the same queue, which is how external
/// producers and a container share the normal queue. `offer` and `poll`
/// never block beyond the push or pop itself.
pub struct EventQueue<E> {
    inner: Arc<Mutex<VecDeque<E>>>,
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Append an event at the tail.
    pub fn offer(&self, event: E) {
        self.inner.lock().push_back(event);
    }

    /// Take the event at the head, if any.
    pub fn poll(&self) -> Option<E> {
        self.inner.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Whether both handles point at the same queue.
    pub fn same_queue(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for EventQueue<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> fmt::Debug for EventQueue<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventQueue")
            .field("len", &self.len())
            .finish()
    }
}

/// Capability to post follow-up events into a container's queues.
///
/// Containers attach one to every event exposing a sender slot right
/// before delivery, so transition logic can emit new events. Posting is
/// fire-and-forget.
pub struct EventSender<E> {
    normal: EventQueue<E>,
    priority: EventQueue<E>,
}

impl<E> EventSender<E> {
    pub fn new(normal: EventQueue<E>, priority: EventQueue<E>) -> Self {
        Self { normal, priority }
    }

    /// Enqueue behind the normal backlog.
    pub fn post_event(&self, event: E) {
        self.normal.offer(event);
    }

    /// Enqueue ahead of the normal backlog.
    pub fn post_priority_event(&self, event: E) {
        self.priority.offer(event);
    }
}

impl<E> Clone for EventSender<E> {
    fn clone(&self) -> Self {
        Self {
            normal: self.normal.clone(),
            priority: self.priority.clone(),
        }
    }
}

impl<E> fmt::Debug for EventSender<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSender")
            .field("normal", &self.normal)
            .field("priority", &self.priority)
            .finish()
    }
}
