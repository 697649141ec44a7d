//! Time sources
//!
//! All runtime timing is expressed in whole milliseconds relative to a
//! clock-specific origin. Components never read the wall clock themselves;
//! they receive `now` from the host, which makes every timing rule testable.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Milliseconds since the clock's origin
pub type Timestamp = u64;

/// A source of monotonic timestamps
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Monotonic clock backed by [`Instant`]
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        self.origin.elapsed().as_millis() as Timestamp
    }
}

/// Explicitly advanced clock for tests and simulations
///
/// Clones share the same underlying time, so a clone handed to a component
/// observes every `advance` made through the original.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Timestamp>>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Jump to an absolute time. Going backwards is ignored.
    pub fn set(&self, now: Timestamp) {
        if now >= self.now.get() {
            self.now.set(now);
        }
    }

    /// Advance by `ms` and return the new time
    pub fn advance(&self, ms: u64) -> Timestamp {
        let next = self.now.get().saturating_add(ms);
        self.now.set(next);
        next
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new(10);
        let view = clock.clone();

        clock.advance(5);
        assert_eq!(view.now(), 15);

        view.set(40);
        assert_eq!(clock.now(), 40);
    }

    #[test]
    fn test_manual_clock_never_goes_backwards() {
        let clock = ManualClock::new(100);
        clock.set(50);
        assert_eq!(clock.now(), 100);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
