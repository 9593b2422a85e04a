//! Reconnect state machine: one pending timer, generation checks, fixed delay.

use std::time::Duration;

use arcticmon::live::{LinkEvent, LinkOutcome, LiveConnection, RECONNECT_DELAY};
use arcticmon::view::ConnectionState;
use tokio::time::Instant;

fn failed() -> LinkEvent {
    LinkEvent::Failed("connection refused".into())
}

#[test]
fn starts_connecting_and_opens() {
    let mut c = LiveConnection::default();
    assert_eq!(c.state(), ConnectionState::Connecting);

    let g = c.begin_connect();
    assert_eq!(g, 1);
    let now = Instant::now();
    assert_eq!(c.on_event(g, LinkEvent::Opened, now), LinkOutcome::Opened);
    assert_eq!(c.state(), ConnectionState::Connected);
    assert!(c.reconnect_deadline().is_none());

    let frame = LinkEvent::Frame("{}".into());
    assert_eq!(c.on_event(g, frame, now), LinkOutcome::Frame("{}".into()));
}

#[test]
fn repeated_errors_schedule_a_single_reconnect() {
    let mut c = LiveConnection::default();
    let g = c.begin_connect();
    let t0 = Instant::now();

    assert_eq!(
        c.on_event(g, failed(), t0),
        LinkOutcome::Disconnected { scheduled: true }
    );
    assert_eq!(c.state(), ConnectionState::Disconnected);
    let deadline = c.reconnect_deadline().expect("timer pending");
    assert_eq!(deadline, t0 + RECONNECT_DELAY);

    let t1 = t0 + Duration::from_secs(1);
    assert_eq!(
        c.on_event(g, failed(), t1),
        LinkOutcome::Disconnected { scheduled: false }
    );
    assert_eq!(c.reconnect_deadline(), Some(deadline));
}

#[test]
fn reconnect_is_due_after_three_seconds() {
    assert_eq!(RECONNECT_DELAY, Duration::from_secs(3));
    let mut c = LiveConnection::default();
    let g = c.begin_connect();
    let t0 = Instant::now();
    c.on_event(g, failed(), t0);

    assert!(!c.reconnect_due(t0 + Duration::from_millis(2999)));
    assert!(c.reconnect_due(t0 + Duration::from_secs(3)));

    // the attempt itself clears the timer
    let g2 = c.begin_connect();
    assert_eq!(g2, g + 1);
    assert_eq!(c.state(), ConnectionState::Connecting);
    assert!(c.reconnect_deadline().is_none());
    assert!(!c.reconnect_due(t0 + Duration::from_secs(60)));
}

#[test]
fn open_cancels_pending_timer() {
    let mut c = LiveConnection::new(Duration::from_secs(3));
    let g = c.begin_connect();
    let now = Instant::now();
    c.on_event(g, failed(), now);
    assert!(c.reconnect_deadline().is_some());

    // a manual reconnect succeeds before the timer fires
    let g2 = c.begin_connect();
    c.on_event(g2, LinkEvent::Opened, now);
    assert_eq!(c.state(), ConnectionState::Connected);
    assert!(c.reconnect_deadline().is_none());
}

#[test]
fn events_from_replaced_link_are_stale() {
    let mut c = LiveConnection::default();
    let old = c.begin_connect();
    let new = c.begin_connect();
    let now = Instant::now();

    assert_eq!(c.on_event(old, failed(), now), LinkOutcome::Stale);
    assert_eq!(c.on_event(old, LinkEvent::Opened, now), LinkOutcome::Stale);
    assert_eq!(c.state(), ConnectionState::Connecting);
    assert!(c.reconnect_deadline().is_none());

    assert_eq!(c.on_event(new, LinkEvent::Opened, now), LinkOutcome::Opened);
    assert_eq!(c.generation(), new);
}

#[test]
fn infinite_retries_with_constant_delay() {
    let mut c = LiveConnection::default();
    let mut now = Instant::now();
    for _ in 0..20 {
        let g = c.begin_connect();
        c.on_event(g, failed(), now);
        assert_eq!(c.reconnect_deadline(), Some(now + RECONNECT_DELAY));
        now += RECONNECT_DELAY;
        assert!(c.reconnect_due(now));
    }
}
