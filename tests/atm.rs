//! Table-driven ATM, alone and inside a container with a screen machine.

use junction::container::{EventConveyor, StateMachineContainer};
use junction::core::{EventQueue, State};
use junction::machine::FiniteStateMachine;
use junction::table::{TableError, TableState, TransitionTable};
use junction::trigger::{FlipFlopTrigger, StateJuncture};
use junction::{event_enum, state_tags};
use std::sync::Arc;

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

type AtmMachine = FiniteStateMachine<TableState<Atm, AtmEvent>, AtmEvent>;

fn atm_table() -> Arc<TransitionTable<Atm, AtmEvent>> {
    let table = TransitionTable::builder()
        .on(Atm::Idle, AtmEvent::Connected, Atm::Loading)
        .on(Atm::Loading, AtmEvent::LoadSuccess, Atm::InService)
        .on(Atm::Loading, AtmEvent::LoadFail, Atm::OutOfService)
        .on(Atm::Loading, AtmEvent::ConnectionClosed, Atm::Disconnected)
        .on(Atm::InService, AtmEvent::ShutDown, Atm::OutOfService)
        .on(Atm::InService, AtmEvent::ConnectionLost, Atm::Disconnected)
        .on(Atm::OutOfService, AtmEvent::StartUp, Atm::InService)
        .on(Atm::OutOfService, AtmEvent::ConnectionLost, Atm::Disconnected)
        .on(Atm::Disconnected, AtmEvent::ConnectionRestored, Atm::InService)
        .build();
    match table {
        Ok(table) => Arc::new(table),
        Err(_) => panic!("ATM table should validate"),
    }
}

fn atm() -> AtmMachine {
    let mut fsm = FiniteStateMachine::new("Atm");
    fsm.setup(atm_table().start(Atm::Idle)).unwrap();
    fsm
}

fn tag(fsm: &AtmMachine) -> Option<Atm> {
    fsm.current_state().map(|s| s.tag())
}

#[test]
fn closure_covers_every_state_and_atm_event() {
    let fsm = atm();

    let mut names: Vec<String> = fsm.states().iter().map(|s| s.name().to_string()).collect();
    names.sort();
    assert_eq!(
        names,
        vec!["Disconnected", "Idle", "InService", "Loading", "OutOfService"]
    );
    assert_eq!(fsm.input_events().len(), 8);
}

#[test]
fn walks_the_atm_lifecycle() {
    let fsm = atm();

    // Not an Idle event
    fsm.input(AtmEvent::StartUp).unwrap();
    assert_eq!(tag(&fsm), Some(Atm::Idle));

    fsm.input(AtmEvent::Connected).unwrap();
    assert_eq!(tag(&fsm), Some(Atm::Loading));

    fsm.input(AtmEvent::LoadSuccess).unwrap();
    assert_eq!(tag(&fsm), Some(Atm::InService));

    fsm.input(AtmEvent::ShutDown).unwrap();
    assert_eq!(tag(&fsm), Some(Atm::OutOfService));

    fsm.input(AtmEvent::StartUp).unwrap();
    assert_eq!(tag(&fsm), Some(Atm::InService));

    // Not an InService event
    fsm.input(AtmEvent::ConnectionClosed).unwrap();
    assert_eq!(tag(&fsm), Some(Atm::InService));

    fsm.input(AtmEvent::ConnectionLost).unwrap();
    assert_eq!(tag(&fsm), Some(Atm::Disconnected));

    fsm.input(AtmEvent::ConnectionRestored).unwrap();
    assert_eq!(tag(&fsm), Some(Atm::InService));
}

#[test]
fn latest_event_skips_ignored_input() {
    let fsm = atm();

    fsm.input(AtmEvent::StartUp).unwrap();
    assert_eq!(fsm.latest_event(), None);

    fsm.input(AtmEvent::Connected).unwrap();
    fsm.input(AtmEvent::StartUp).unwrap();
    assert_eq!(fsm.latest_event(), Some(AtmEvent::Connected));

    fsm.input(AtmEvent::LoadFail).unwrap();
    assert_eq!(fsm.latest_event(), Some(AtmEvent::LoadFail));
    assert_eq!(tag(&fsm), Some(Atm::OutOfService));
}

#[test]
fn conflicting_atm_rows_are_reported_together() {
    let result = TransitionTable::<Atm, AtmEvent>::builder()
        .on(Atm::Idle, AtmEvent::Connected, Atm::Loading)
        .on(Atm::Idle, AtmEvent::Connected, Atm::InService)
        .on(Atm::Loading, AtmEvent::LoadFail, Atm::OutOfService)
        .on(Atm::Loading, AtmEvent::LoadFail, Atm::Disconnected)
        .build();

    match result {
        Ok(_) => panic!("Expected conflicts"),
        Err(errors) => {
            assert_eq!(errors.len(), 2);
            assert!(errors.iter().any(|e| matches!(
                e,
                TableError::ConflictingTransition { state, .. } if state == "Loading"
            )));
        }
    }
}

#[test]
fn screen_follows_service_through_a_flip_flop() {
    let screen_table = TransitionTable::builder()
        .on(Screen::Blank, AtmEvent::ShowWelcome, Screen::Welcome)
        .on(Screen::Blank, AtmEvent::ShowClosed, Screen::Closed)
        .on(Screen::Welcome, AtmEvent::ShowClosed, Screen::Closed)
        .on(Screen::Closed, AtmEvent::ShowWelcome, Screen::Welcome)
        .build()
        .ok()
        .unwrap();
    let screen_table = Arc::new(screen_table);

    let atm = Arc::new(atm());
    let mut screen = FiniteStateMachine::new("Screen");
    screen.setup(screen_table.start(Screen::Blank)).unwrap();
    let screen = Arc::new(screen);

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
    let screen_tag = || screen.current_state().map(|s| s.tag());

    // Out of service: the flip-flop emits its second event
    conveyor.post_event(AtmEvent::Connected);
    assert_eq!(conveyor.deliver_all_events(&container), Ok(2));
    assert_eq!(screen_tag(), Some(Screen::Closed));

    // Rising edge
    conveyor.post_event(AtmEvent::LoadSuccess);
    assert_eq!(conveyor.deliver_all_events(&container), Ok(2));
    assert_eq!(screen_tag(), Some(Screen::Welcome));

    // Still in service: no emission
    conveyor.post_event(AtmEvent::ConnectionClosed);
    assert_eq!(conveyor.deliver_all_events(&container), Ok(1));
    assert_eq!(screen_tag(), Some(Screen::Welcome));

    // Falling side
    conveyor.post_event(AtmEvent::ShutDown);
    assert_eq!(conveyor.deliver_all_events(&container), Ok(2));
    assert_eq!(screen_tag(), Some(Screen::Closed));
}
