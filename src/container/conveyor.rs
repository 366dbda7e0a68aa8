//! Producer-side helper that posts events and drains a dispatcher.

use super::EventDispatcher;
use crate::core::{Event, EventQueue};

/// Posts events onto a normal queue and drains a dispatcher until it
/// reports nothing left to deliver.
#[derive(Debug)]
pub struct EventConveyor<E: Event> {
    queue: EventQueue<E>,
}

impl<E: Event> EventConveyor<E> {
    pub fn new(queue: EventQueue<E>) -> Self {
        Self { queue }
    }

    pub fn post_event(&self, event: E) {
        self.queue.offer(event);
    }

    /// Deliver until the dispatcher runs dry; returns how many events were
    /// consumed. An empty queue is not an error.
    pub fn deliver_all_events<D>(&self, dispatcher: &D) -> Result<usize, D::Error>
    where
        D: EventDispatcher + ?Sized,
    {
        let mut delivered = 0;
        while dispatcher.deliver_next_event()? {
            delivered += 1;
        }
        Ok(delivered)
    }
}
