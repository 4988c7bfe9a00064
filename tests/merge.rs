use futures::{executor::block_on, StreamExt};
use lamport::{Config, LamportClock, System};
use proptest::prelude::*;

proptest! {
    #[test]
    fn merge_rule(local in 0u64..u64::MAX, received in 0u64..u64::MAX) {
        let clock = LamportClock::starting_at(local);
        let merged = clock.merge(received);
        prop_assert_eq!(merged, local.max(received) + 1);
        prop_assert_eq!(clock.time(), merged);
    }

    #[test]
    fn merge_never_decreases(local in any::<u64>(), received in any::<u64>()) {
        let clock = LamportClock::starting_at(local);
        let merged = clock.merge(received);
        prop_assert!(merged >= local);
        prop_assert!(merged >= received);
        prop_assert_eq!(merged, local.max(received).saturating_add(1));
    }

    #[test]
    fn step_never_decreases(start in any::<u64>()) {
        let clock = LamportClock::starting_at(start);
        prop_assert_eq!(clock.step(), start.saturating_add(1));
        prop_assert!(clock.time() >= start);
    }

    #[test]
    fn steps_add_up(start in 0u64..1_000_000, steps in 0u64..500) {
        let clock = LamportClock::starting_at(start);
        for _ in 0..steps {
            clock.step();
        }
        prop_assert_eq!(clock.time(), start + steps);
    }
}

/// Receiver at `local` gets an event stamped `received` (at least 1).
fn receive_at(local: u64, received: u64) -> u64 {
    let mut system = System::new(Config::default()).unwrap();
    let sender = system.add_process("sender").unwrap();
    let receiver = system.add_process("receiver").unwrap();

    for _ in 1..received {
        sender.step();
    }
    for _ in 0..local {
        receiver.step();
    }

    let mut events = receiver.observe();
    assert_eq!(sender.send_blocking(&receiver, "msg").unwrap(), received);
    let event = block_on(events.next()).unwrap();
    assert_eq!(receiver.time(), event.time);

    system.shutdown();
    event.time
}

#[test]
fn received_ahead() {
    assert_eq!(receive_at(2, 9), 10);
}

#[test]
fn received_behind() {
    assert_eq!(receive_at(9, 2), 10);
}

#[test]
fn received_equal() {
    assert_eq!(receive_at(5, 5), 6);
}

#[test]
fn fresh_receiver() {
    assert_eq!(receive_at(0, 1), 2);
}
