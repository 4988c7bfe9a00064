use futures::{executor::block_on, StreamExt};
use lamport::{Config, System};

#[test]
fn scenario() {
    let mut system = System::new(Config::default()).unwrap();
    let a = system.add_process("A").unwrap();
    let b = system.add_process("B").unwrap();
    let c = system.add_process("C").unwrap();

    let mut b_received = b.observe();
    let mut c_received = c.observe();

    assert_eq!(a.send_blocking(&b, "hi").unwrap(), 1);
    let event = block_on(b_received.next()).unwrap();
    assert_eq!(event.from.as_str(), "A");
    assert_eq!(event.to.as_str(), "B");
    assert_eq!(event.message, "hi");
    assert_eq!(event.time, 2);
    assert_eq!(b.time(), 2);

    assert_eq!(b.send_blocking(&c, "hi").unwrap(), 3);
    let event = block_on(c_received.next()).unwrap();
    assert_eq!(event.time, 4);

    assert_eq!(a.time(), 1);
    assert_eq!(b.time(), 3);
    assert_eq!(c.time(), 4);

    system.shutdown();
}

#[test]
fn causal_chain() {
    let mut system = System::new(Config::default()).unwrap();
    let a = system.add_process("A").unwrap();
    let b = system.add_process("B").unwrap();
    let c = system.add_process("C").unwrap();

    // give the later links of the chain a head start
    for _ in 0..7 {
        c.step();
    }
    for _ in 0..3 {
        b.step();
    }

    let mut b_received = b.observe();
    let mut c_received = c.observe();

    let a_sent = a.send_blocking(&b, "first").unwrap();
    let b_received_at = block_on(b_received.next()).unwrap().time;
    let b_sent = b.send_blocking(&c, "second").unwrap();
    let c_received_at = block_on(c_received.next()).unwrap().time;

    assert!(a_sent < b_received_at);
    assert!(b_received_at < b_sent);
    assert!(b_sent < c_received_at);
    assert!(c.time() > a_sent);
    assert!(c.time() > b_received_at);

    system.shutdown();
}
