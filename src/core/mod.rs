//! Collaborator contracts shared by every other module.
//!
//! - `Event` and `State`: what user choreographies implement
//! - `Guard`: pure predicates used by event junctures
//! - `EventQueue` / `EventSender`: the queues a container drains and the
//!   capability events carry to post into them

mod event;
mod guard;
mod sender;
mod state;

pub use event::{Event, EventFactory, SenderSlot};
pub use guard::Guard;
pub use sender::{EventQueue, EventSender};
pub use state::State;
