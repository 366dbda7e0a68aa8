//! ATM with a Screen
//!
//! This example drives a table-driven ATM machine through a container and
//! keeps a second machine, the customer screen, in sync with a flip-flop
//! trigger.
//!
//! Key concepts:
//! - Transition tables declared with `state_tags!` and `event_enum!`
//! - Table validation accumulating every conflict at once
//! - A flip-flop trigger emitting one event on entry to a state and another
//!   whenever the machine is elsewhere
//!
//! Run with: RUST_LOG=junction=debug cargo run --example atm

use junction::container::{EventConveyor, StateMachineContainer};
use junction::core::{EventQueue, State};
use junction::machine::FiniteStateMachine;
use junction::table::{TableState, TransitionTable};
use junction::trigger::{FlipFlopTrigger, StateJuncture};
use junction::{event_enum, state_tags};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

state_tags! {
    enum Atm {
        Idle,
        Loading,
        InService,
        OutOfService,
        Disconnected,
    }
}

state_tags! {
    enum Screen {
        Blank,
        Welcome,
        Closed,
    }
}

event_enum! {
    enum AtmEvent {
        Connected,
        LoadSuccess,
        LoadFail,
        StartUp,
        ShutDown,
        ConnectionLost,
        ConnectionClosed,
        ConnectionRestored,
        ShowWelcome,
        ShowClosed,
    }
}

fn atm_table() -> TransitionTable<Atm, AtmEvent> {
    let built = TransitionTable::builder()
        .on(Atm::Idle, AtmEvent::Connected, Atm::Loading)
        .on(Atm::Loading, AtmEvent::LoadSuccess, Atm::InService)
        .on(Atm::Loading, AtmEvent::LoadFail, Atm::OutOfService)
        .on(Atm::Loading, AtmEvent::ConnectionClosed, Atm::Disconnected)
        .on(Atm::InService, AtmEvent::ShutDown, Atm::OutOfService)
        .on(Atm::InService, AtmEvent::ConnectionLost, Atm::Disconnected)
        .on(Atm::OutOfService, AtmEvent::StartUp, Atm::InService)
        .on(Atm::OutOfService, AtmEvent::ConnectionLost, Atm::Disconnected)
        .on(Atm::Disconnected, AtmEvent::ConnectionRestored, Atm::InService)
        .on_entry(Atm::Disconnected, |event: &AtmEvent| {
            println!("  [atm] link down after {event:?}");
            Ok(())
        })
        .build();

    match built {
        Ok(table) => table,
        Err(errors) => {
            for error in errors.iter() {
                eprintln!("invalid ATM table: {error}");
            }
            std::process::exit(1);
        }
    }
}

fn screen_table() -> TransitionTable<Screen, AtmEvent> {
    let built = TransitionTable::builder()
        .on(Screen::Blank, AtmEvent::ShowWelcome, Screen::Welcome)
        .on(Screen::Blank, AtmEvent::ShowClosed, Screen::Closed)
        .on(Screen::Welcome, AtmEvent::ShowClosed, Screen::Closed)
        .on(Screen::Closed, AtmEvent::ShowWelcome, Screen::Welcome)
        .build();

    match built {
        Ok(table) => table,
        Err(errors) => {
            for error in errors.iter() {
                eprintln!("invalid screen table: {error}");
            }
            std::process::exit(1);
        }
    }
}

fn demonstrate_conflicting_table() {
    println!("\n=== Table Validation ===\n");

    let result = TransitionTable::<Atm, AtmEvent>::builder()
        .on(Atm::Idle, AtmEvent::Connected, Atm::Loading)
        .on(Atm::Idle, AtmEvent::Connected, Atm::InService)
        .on(Atm::Loading, AtmEvent::LoadFail, Atm::OutOfService)
        .on(Atm::Loading, AtmEvent::LoadFail, Atm::Disconnected)
        .build();

    match result {
        Ok(_) => println!("Unexpectedly valid"),
        Err(errors) => {
            println!("Rejected with {} errors:", errors.len());
            for error in errors.iter() {
                println!("  - {error}");
            }
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== ATM ===\n");

    let atm_table = Arc::new(atm_table());
    let screen_table = Arc::new(screen_table());

    let mut atm = FiniteStateMachine::new("Atm");
    let mut screen = FiniteStateMachine::new("Screen");
    if let Err(e) = atm.setup(TableState::new(Atm::Idle, &atm_table)) {
        eprintln!("{e}");
        return;
    }
    if let Err(e) = screen.setup(TableState::new(Screen::Blank, &screen_table)) {
        eprintln!("{e}");
        return;
    }
    let atm = Arc::new(atm);
    let screen = Arc::new(screen);

    println!("Reachable ATM states:");
    for state in atm.states() {
        println!("  - {}", state.name());
    }

    let queue: EventQueue<AtmEvent> = EventQueue::new();
    let container = StateMachineContainer::new("Branch", queue.clone());
    container.add_state_machine(atm.clone());
    container.add_state_machine(screen.clone());
    container.add_trigger(
        "screen",
        FlipFlopTrigger::new(
            AtmEvent::ShowWelcome,
            AtmEvent::ShowClosed,
            StateJuncture::new(atm.clone(), "InService"),
        ),
    );

    let conveyor = EventConveyor::new(queue);
    let script = [
        AtmEvent::StartUp,
        AtmEvent::Connected,
        AtmEvent::LoadSuccess,
        AtmEvent::ShutDown,
        AtmEvent::StartUp,
        AtmEvent::ConnectionClosed,
        AtmEvent::ConnectionLost,
        AtmEvent::ConnectionRestored,
    ];

    println!("\nScript:");
    for event in script {
        conveyor.post_event(event);
        match conveyor.deliver_all_events(&container) {
            Ok(delivered) => println!(
                "  {:<20} atm={:<14} screen={:<8} ({delivered} delivered)",
                format!("{event:?}"),
                atm.current_state().map(|s| s.name().to_string()).unwrap_or_default(),
                screen.current_state().map(|s| s.name().to_string()).unwrap_or_default(),
            ),
            Err(e) => {
                eprintln!("  delivery failed: {e}");
                return;
            }
        }
    }

    println!("\nLatest ATM event: {:?}", atm.latest_event());

    demonstrate_conflicting_table();
}
