//! Soda Machine
//!
//! This example wires two machines together with a repeating trigger.
//!
//! Key concepts:
//! - Routing by enum variant so every `Coin(_)` reaches the coin box
//! - States posting follow-up events through the attached sender
//! - Triggered events overtaking the normal backlog
//! - Checkpointing a machine and resuming a fresh copy from it
//!
//! Run with: RUST_LOG=junction=debug cargo run --example soda_machine

use junction::container::{ByVariant, StateMachineContainer};
use junction::core::{Event, EventQueue, SenderSlot, State};
use junction::machine::{FiniteStateMachine, TransitionError};
use junction::trigger::{RepeatingTrigger, StateJuncture};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const PRICE: u32 = 100;

#[derive(Clone, Debug)]
enum Soda {
    Coin(u32),
    CreditAccepted,
    PaidOneCredit(SenderSlot<Soda>),
    SelectedSoda,
}

impl Event for Soda {
    fn name(&self) -> &str {
        match self {
            Self::Coin(_) => "Coin",
            Self::CreditAccepted => "CreditAccepted",
            Self::PaidOneCredit(_) => "PaidOneCredit",
            Self::SelectedSoda => "SelectedSoda",
        }
    }

    fn sender_slot(&mut self) -> Option<&mut SenderSlot<Self>> {
        match self {
            Self::PaidOneCredit(slot) => Some(slot),
            _ => None,
        }
    }
}

// Coin box: collects coins until a soda is paid for
#[derive(Clone, Debug)]
struct CoinBox {
    offering: bool,
    total: Arc<AtomicU32>,
}

impl State<Soda> for CoinBox {
    fn name(&self) -> &str {
        if self.offering {
            "OfferingCredit"
        } else {
            "CollectingCoins"
        }
    }

    fn on_transition(&self, event: &Soda) -> Result<Self, TransitionError> {
        let offering = match event {
            Soda::Coin(value) => self.total.fetch_add(*value, Ordering::SeqCst) + value >= PRICE,
            Soda::CreditAccepted => {
                self.total.fetch_sub(PRICE, Ordering::SeqCst);
                false
            }
            _ => return Err(TransitionError::rejected(event, "not a coin box event")),
        };
        Ok(Self {
            offering,
            total: Arc::clone(&self.total),
        })
    }

    fn transition_states(&self) -> Vec<Self> {
        [false, true]
            .into_iter()
            .map(|offering| Self {
                offering,
                total: Arc::clone(&self.total),
            })
            .collect()
    }

    fn input_events(&self) -> Vec<Soda> {
        if self.offering {
            vec![Soda::CreditAccepted]
        } else {
            vec![Soda::Coin(0)]
        }
    }
}

// Credit tally: counts paid sodas
#[derive(Clone, Debug)]
struct CreditTally {
    credits: Arc<AtomicU32>,
}

impl State<Soda> for CreditTally {
    fn name(&self) -> &str {
        "InService"
    }

    fn on_transition(&self, event: &Soda) -> Result<Self, TransitionError> {
        match event {
            Soda::PaidOneCredit(slot) => {
                self.credits.fetch_add(1, Ordering::SeqCst);
                if let Some(sender) = slot.get() {
                    sender.post_priority_event(Soda::CreditAccepted);
                }
            }
            Soda::SelectedSoda => {
                if self.credits.load(Ordering::SeqCst) == 0 {
                    return Err(TransitionError::rejected(event, "no credit"));
                }
                self.credits.fetch_sub(1, Ordering::SeqCst);
                println!("  *clunk* a soda drops");
            }
            _ => return Err(TransitionError::rejected(event, "not a tally event")),
        }
        Ok(self.clone())
    }

    fn transition_states(&self) -> Vec<Self> {
        vec![self.clone()]
    }

    fn input_events(&self) -> Vec<Soda> {
        vec![Soda::PaidOneCredit(SenderSlot::new()), Soda::SelectedSoda]
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Soda Machine ===\n");

    let total = Arc::new(AtomicU32::new(0));
    let credits = Arc::new(AtomicU32::new(0));

    let mut collector = FiniteStateMachine::new("MoneyCollector");
    let mut tally = FiniteStateMachine::new("CreditTally");
    let setup = collector
        .setup(CoinBox {
            offering: false,
            total: Arc::clone(&total),
        })
        .and_then(|()| {
            tally.setup(CreditTally {
                credits: Arc::clone(&credits),
            })
        });
    if let Err(e) = setup {
        eprintln!("{e}");
        return;
    }
    let collector = Arc::new(collector);
    let tally = Arc::new(tally);

    let queue = EventQueue::new();
    let container: StateMachineContainer<Soda, ByVariant> =
        StateMachineContainer::with_key_extractor("SodaMachine", queue.clone(), ByVariant);
    container.add_state_machine(collector.clone());
    container.add_state_machine(tally.clone());
    container.add_trigger(
        "pay-credit",
        RepeatingTrigger::new(
            Soda::PaidOneCredit(SenderSlot::new()),
            StateJuncture::new(collector.clone(), "OfferingCredit"),
        ),
    );

    for event in [
        Soda::Coin(25),
        Soda::Coin(25),
        Soda::Coin(50),
        Soda::SelectedSoda,
        Soda::Coin(100),
    ] {
        queue.offer(event);
    }

    loop {
        match container.deliver_next_event() {
            Ok(true) => println!(
                "  coins={:<4} credits={} collector={}",
                total.load(Ordering::SeqCst),
                credits.load(Ordering::SeqCst),
                collector.current_state().map(|s| s.name().to_string()).unwrap_or_default(),
            ),
            Ok(false) => break,
            Err(e) => {
                eprintln!("  {e}");
                break;
            }
        }
    }

    println!("\n=== Checkpoint ===\n");

    let checkpoint = tally.checkpoint();
    match checkpoint.to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("{e}"),
    }

    let mut replica = FiniteStateMachine::new("CreditTally");
    let resumed = replica
        .setup(CreditTally {
            credits: Arc::new(AtomicU32::new(credits.load(Ordering::SeqCst))),
        })
        .map_err(|e| e.to_string())
        .and_then(|()| replica.resume(&checkpoint).map_err(|e| e.to_string()));
    match resumed {
        Ok(()) => println!("\nReplica resumed, latest event: {:?}", replica.latest_event()),
        Err(e) => eprintln!("\nResume failed: {e}"),
    }
}
