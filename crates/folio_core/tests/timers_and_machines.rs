//! Integration tests for timers driven by a manual clock together with
//! interaction state machines

use folio_core::fsm::{StateId, StateMachine};
use folio_core::{event_types, Clock, ManualClock, PointerEvent, TimerQueue};

const IDLE: StateId = 0;
const HOVER: StateId = 1;
const COOLING: StateId = 2;

#[derive(Clone, Debug, PartialEq)]
enum Job {
    Expire(u32),
    Cooldown,
}

/// A cooldown timer scheduled on a transition moves the machine back
#[test]
fn test_timer_drives_state_machine() {
    let clock = ManualClock::new(0);
    let mut timers = TimerQueue::new();
    let mut fsm = StateMachine::builder(IDLE)
        .on(IDLE, event_types::POINTER_ENTER, HOVER)
        .on(HOVER, event_types::POINTER_MOVE, COOLING)
        .on(COOLING, event_types::COOLDOWN_ELAPSED, HOVER)
        .on(HOVER, event_types::POINTER_LEAVE, IDLE)
        .on(COOLING, event_types::POINTER_LEAVE, IDLE)
        .build();

    let enter = PointerEvent::enter(0.0, 0.0, clock.now());
    fsm.send(enter.event_id());

    let moved = PointerEvent::moved(1.0, 1.0, clock.advance(16));
    assert_eq!(fsm.send(moved.event_id()), Some((HOVER, COOLING)));
    timers.schedule_once(moved.timestamp + 200, Job::Cooldown);

    clock.advance(199);
    assert!(timers.poll(clock.now()).is_empty());
    assert!(fsm.is_in(COOLING));

    clock.advance(1);
    for fired in timers.poll(clock.now()) {
        if fired.payload == Job::Cooldown {
            fsm.send(event_types::COOLDOWN_ELAPSED);
        }
    }
    assert!(fsm.is_in(HOVER));
    assert!(timers.is_empty());
}

/// Cancelling on teardown leaves nothing behind, and stale handles stay dead
#[test]
fn test_teardown_cancels_outstanding_work() {
    let clock = ManualClock::new(1_000);
    let mut timers = TimerQueue::new();

    let handles: Vec<_> = (0..5)
        .map(|i| timers.schedule_once(clock.now() + 100 * (i + 1) as u64, Job::Expire(i)))
        .collect();
    let ambient = timers.schedule_repeating(clock.now() + 250, 250, Job::Cooldown);

    clock.advance(250);
    let fired = timers.poll(clock.now());
    assert_eq!(fired.len(), 3);
    assert!(!timers.contains(handles[0]));

    assert_eq!(timers.cancel_all(), 4);
    assert_eq!(timers.pending(), 0);
    assert!(!timers.cancel(ambient));
    assert!(!timers.cancel(handles[4]));

    clock.advance(10_000);
    assert!(timers.poll(clock.now()).is_empty());

    // Slots are reused, old handles never alias new timers
    let fresh = timers.schedule_once(clock.now() + 1, Job::Expire(9));
    assert!(!timers.contains(handles[0]));
    assert!(timers.contains(fresh));
}

/// Interleaved expirations and new schedules stay in deadline order
#[test]
fn test_interleaved_scheduling_fires_in_order() {
    let mut timers = TimerQueue::new();
    timers.schedule_once(300, Job::Expire(3));
    timers.schedule_once(100, Job::Expire(1));

    let first: Vec<_> = timers.poll(150).into_iter().map(|f| f.payload).collect();
    assert_eq!(first, vec![Job::Expire(1)]);

    timers.schedule_once(200, Job::Expire(2));
    let rest: Vec<_> = timers.poll(400).into_iter().map(|f| f.payload).collect();
    assert_eq!(rest, vec![Job::Expire(2), Job::Expire(3)]);
}
